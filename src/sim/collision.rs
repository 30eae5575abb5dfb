//! Collision detection and resolution
//!
//! Resolution is two-phase. The scan walks read-only views of the current
//! collections and records decisions by entity id; the apply phase then
//! removes, spawns and bills everything at once. Removing one match never
//! shifts the indices the scan is still using.

use glam::Vec2;

use super::events::AudioCue;
use super::score::ScoreEvent;
use super::state::{AsteroidSize, SAUCER_RADIUS};
use super::world::{EXPLOSION_PARTICLES, World};
use crate::consts::*;

/// Children produced when a large or medium asteroid breaks
pub const SPLIT_CHILDREN: usize = 2;

/// Circle-circle overlap (strict: touching circles do not collide)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// What hit the ship this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShipHit {
    Asteroid { id: u32 },
    Saucer { id: u32, pos: Vec2 },
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    /// Points to award, in the order the kills were found
    pub score_events: Vec<ScoreEvent>,
    /// Bullets consumed this tick
    pub bullets_consumed: Vec<u32>,
    /// Asteroids destroyed by bullets
    pub asteroids_destroyed: Vec<u32>,
    /// Asteroids created by splitting
    pub asteroids_spawned: Vec<u32>,
    /// Saucers destroyed by bullets or by ramming the ship
    pub saucers_destroyed: Vec<u32>,
    /// Set when the ship lost a life
    pub ship_hit: Option<ShipHit>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.bullets_consumed.is_empty() && self.ship_hit.is_none()
    }
}

struct AsteroidKill {
    id: u32,
    pos: Vec2,
    size: AsteroidSize,
}

struct SaucerKill {
    id: u32,
    pos: Vec2,
}

/// Detect every overlap for this tick and apply the consequences
pub fn resolve_collisions(world: &mut World) -> CollisionReport {
    let mut report = CollisionReport::default();
    let was_invulnerable = world.run.is_invulnerable();

    // Scan phase: read-only, decisions keyed by id
    let mut asteroid_kills: Vec<AsteroidKill> = Vec::new();
    let mut saucer_kills: Vec<SaucerKill> = Vec::new();

    for bullet in &world.bullets {
        // First match wins; a rock claimed by an earlier bullet is already gone
        let rock = world.asteroids.iter().find(|a| {
            !asteroid_kills.iter().any(|k| k.id == a.id)
                && circles_overlap(bullet.pos, BULLET_RADIUS, a.pos, a.radius())
        });
        if let Some(rock) = rock {
            report.bullets_consumed.push(bullet.id);
            asteroid_kills.push(AsteroidKill {
                id: rock.id,
                pos: rock.pos,
                size: rock.size,
            });
            continue;
        }

        let saucer = world.saucers.iter().find(|s| {
            !saucer_kills.iter().any(|k| k.id == s.id)
                && circles_overlap(bullet.pos, BULLET_RADIUS, s.pos, s.radius())
        });
        if let Some(saucer) = saucer {
            report.bullets_consumed.push(bullet.id);
            saucer_kills.push(SaucerKill {
                id: saucer.id,
                pos: saucer.pos,
            });
        }
    }

    if !was_invulnerable {
        let ship_pos = world.ship.pos;
        let rock = world.asteroids.iter().find(|a| {
            !asteroid_kills.iter().any(|k| k.id == a.id)
                && circles_overlap(ship_pos, SHIP_COLLISION_RADIUS, a.pos, a.radius())
        });
        report.ship_hit = match rock {
            Some(rock) => Some(ShipHit::Asteroid { id: rock.id }),
            None => world
                .saucers
                .iter()
                .find(|s| {
                    !saucer_kills.iter().any(|k| k.id == s.id)
                        && circles_overlap(ship_pos, SHIP_COLLISION_RADIUS, s.pos, SAUCER_RADIUS)
                })
                .map(|s| ShipHit::Saucer { id: s.id, pos: s.pos }),
        };
    }

    // Apply phase
    let had_saucers = !world.saucers.is_empty();

    let consumed = &report.bullets_consumed;
    world.bullets.retain(|b| !consumed.contains(&b.id));
    world
        .asteroids
        .retain(|a| !asteroid_kills.iter().any(|k| k.id == a.id));
    world
        .saucers
        .retain(|s| !saucer_kills.iter().any(|k| k.id == s.id));

    for kill in &asteroid_kills {
        world.spawn_burst(kill.pos, EXPLOSION_PARTICLES);
        world.emit(AudioCue::ExplosionAsteroid);
        report
            .score_events
            .push(ScoreEvent::AsteroidDestroyed(kill.size));
        report.asteroids_destroyed.push(kill.id);

        if let Some(child) = kill.size.child() {
            for _ in 0..SPLIT_CHILDREN {
                let id = world.spawn_asteroid(child, kill.pos, 1.0);
                report.asteroids_spawned.push(id);
            }
        }
    }

    for kill in &saucer_kills {
        world.spawn_burst(kill.pos, EXPLOSION_PARTICLES);
        world.emit(AudioCue::ExplosionSaucer);
        report.score_events.push(ScoreEvent::SaucerDestroyed);
        report.saucers_destroyed.push(kill.id);
    }

    if let Some(hit) = report.ship_hit {
        let wreck = world.ship.pos;
        let lives = world.run.tracker.lose_life();
        world.run.invulnerable_ticks = INVULNERABLE_TICKS;
        world.spawn_burst(wreck, EXPLOSION_PARTICLES);
        world.emit(AudioCue::ExplosionShip);
        world.respawn_ship();

        // Ramming a saucer takes it down too, without the bonus
        if let ShipHit::Saucer { id, pos } = hit {
            world.saucers.retain(|s| s.id != id);
            world.spawn_burst(pos, EXPLOSION_PARTICLES);
            world.emit(AudioCue::ExplosionSaucer);
            report.saucers_destroyed.push(id);
        }
        log::info!("Ship destroyed, {} lives left", lives);
    }

    if had_saucers && world.saucers.is_empty() {
        world.stop_siren();
    }

    // The tick that sets the window does not count against it
    if was_invulnerable {
        world.run.invulnerable_ticks = world.run.invulnerable_ticks.saturating_sub(1);
    }

    report
}
