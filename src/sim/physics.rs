//! Per-tick motion
//!
//! Applies the tick's control input to the ship, then advances every entity
//! by one step. Ship and asteroids wrap; bullets and saucers are culled when
//! they leave the field. Nothing here decides collisions.

use super::events::AudioCue;
use super::state::{
    Bullet, PARTICLE_DAMPING, SAUCER_SPEED, SAUCER_WOBBLE_AMPLITUDE, SAUCER_WOBBLE_RATE,
};
use super::tick::TickInput;
use super::world::World;
use crate::consts::*;

/// Particles left behind at each end of a hyperspace jump
pub const HYPERSPACE_PARTICLES: usize = 8;

/// Advance the world by one physics step
pub fn step_physics(world: &mut World, input: &TickInput) {
    apply_controls(world, input);
    integrate_ship(world);
    integrate_bullets(world);
    integrate_asteroids(world);
    integrate_saucers(world);
    integrate_particles(world);
}

fn apply_controls(world: &mut World, input: &TickInput) {
    let mut turn = input.rotate_delta;
    if input.rotate_left {
        turn -= SHIP_TURN_RATE;
    }
    if input.rotate_right {
        turn += SHIP_TURN_RATE;
    }
    if turn != 0.0 {
        world.ship.rotate(turn);
    }

    if input.thrust {
        world.ship.thrust();
        world.emit(AudioCue::Thrust);
    }

    if input.hyperspace {
        hyperspace(world);
    }

    if input.fire {
        fire(world);
    }
}

/// Fire a bullet from the ship's nose if the cooldown allows
///
/// Returns true when a bullet was created.
pub fn fire(world: &mut World) -> bool {
    if world.ship.fire_cooldown > 0 {
        return false;
    }
    let id = world.next_entity_id();
    let bullet = Bullet::new(id, world.ship.pos, world.ship.heading);
    world.bullets.push(bullet);
    world.ship.fire_cooldown = FIRE_COOLDOWN_TICKS;
    world.emit(AudioCue::Fire);
    true
}

/// Jump to a random point in the field if the cooldown allows
///
/// Returns true when the jump happened.
pub fn hyperspace(world: &mut World) -> bool {
    if world.ship.hyperspace_cooldown > 0 {
        return false;
    }
    let from = world.ship.pos;
    world.spawn_burst(from, HYPERSPACE_PARTICLES);

    let field = world.field;
    let to = field.random_point(world.rng());
    world.ship.pos = to;
    world.spawn_burst(to, HYPERSPACE_PARTICLES);

    world.ship.hyperspace_cooldown = HYPERSPACE_COOLDOWN_TICKS;
    world.emit(AudioCue::Hyperspace);
    log::debug!("Hyperspace jump ({:.0}, {:.0}) -> ({:.0}, {:.0})", from.x, from.y, to.x, to.y);
    true
}

fn integrate_ship(world: &mut World) {
    let field = world.field;
    let ship = &mut world.ship;
    ship.pos += ship.vel;
    ship.vel *= SHIP_FRICTION;
    ship.pos = field.wrap_exact(ship.pos);
    ship.fire_cooldown = ship.fire_cooldown.saturating_sub(1);
    ship.hyperspace_cooldown = ship.hyperspace_cooldown.saturating_sub(1);
}

fn integrate_bullets(world: &mut World) {
    let field = world.field;
    for bullet in &mut world.bullets {
        bullet.pos += bullet.vel;
        bullet.life = bullet.life.saturating_sub(1);
    }
    world.bullets.retain(|b| !b.is_expired(&field));
}

fn integrate_asteroids(world: &mut World) {
    let field = world.field;
    for rock in &mut world.asteroids {
        rock.pos += rock.vel;
        rock.rotation += rock.spin;
        rock.pos = field.wrap_with_margin(rock.pos, rock.radius());
    }
}

fn integrate_saucers(world: &mut World) {
    if world.saucers.is_empty() {
        return;
    }
    let field = world.field;
    for saucer in &mut world.saucers {
        saucer.pos.x += saucer.direction * SAUCER_SPEED;
        saucer.phase += SAUCER_WOBBLE_RATE;
        saucer.pos.y += saucer.phase.sin() * SAUCER_WOBBLE_AMPLITUDE;
    }
    world.saucers.retain(|s| !s.is_off_field(&field));

    // Last saucer flew away
    if world.saucers.is_empty() {
        world.stop_siren();
    }
}

fn integrate_particles(world: &mut World) {
    for particle in &mut world.particles {
        particle.pos += particle.vel;
        particle.vel *= PARTICLE_DAMPING;
        particle.life = particle.life.saturating_sub(1);
    }
    world.particles.retain(|p| p.life > 0);
}
