//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one tick in a fixed order:
//! physics, collisions, spawning, scoring, then the siren task.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionReport, resolve_collisions};
use super::physics::step_physics;
use super::score::{RunOutcome, settle};
use super::spawn::{SpawnReport, update_spawns};
use super::world::World;

/// Control input for a single tick, snapshotted before the tick starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Rotate counter-clockwise at the keyboard turn rate
    pub rotate_left: bool,
    /// Rotate clockwise at the keyboard turn rate
    pub rotate_right: bool,
    /// Apply thrust along the heading
    pub thrust: bool,
    /// Fire (gated by the fire cooldown)
    pub fire: bool,
    /// Hyperspace (gated by the hyperspace cooldown)
    pub hyperspace: bool,
    /// Continuous rotation from a drag gesture (radians this tick)
    pub rotate_delta: f32,
}

/// Everything one tick changed, for the caller to react to
#[derive(Debug, Clone)]
pub struct TickReport {
    pub collisions: CollisionReport,
    pub spawns: SpawnReport,
    /// Points awarded this tick
    pub points: u64,
    pub outcome: RunOutcome,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    debug_assert!(world.run.lives() > 0, "ticking a finished run");

    step_physics(world, input);
    let collisions = resolve_collisions(world);
    let spawns = update_spawns(world);
    let (points, outcome) = settle(&mut world.run.tracker, &collisions.score_events);
    world.tick_siren();
    world.time_ticks += 1;

    if !collisions.is_empty() {
        log::debug!(
            "tick {}: {} bullets spent, {} rocks and {} saucers down, ship hit: {}",
            world.time_ticks,
            collisions.bullets_consumed.len(),
            collisions.asteroids_destroyed.len(),
            collisions.saucers_destroyed.len(),
            collisions.ship_hit.is_some()
        );
    }

    if let RunOutcome::LivesExhausted { final_score } = outcome {
        log::info!("Game over at level {} with {} points", world.run.level, final_score);
    }

    TickReport {
        collisions,
        spawns,
        points,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::events::{AudioCue, SIREN_PERIOD_TICKS};
    use crate::sim::state::{AsteroidSize, Bullet, Field};
    use glam::Vec2;

    fn running_world(seed: u64) -> World {
        let mut world = World::new(Field::default(), seed);
        world.reset_run();
        world
    }

    #[test]
    fn test_tick_advances_time() {
        let mut world = running_world(1);
        let report = tick(&mut world, &TickInput::default());
        assert_eq!(world.time_ticks, 1);
        assert_eq!(report.outcome, RunOutcome::Continue);
        assert_eq!(report.points, 0);
    }

    #[test]
    fn test_kill_is_scored_in_same_tick() {
        let mut world = running_world(3);
        world.asteroids.clear();
        world.spawn_asteroid(AsteroidSize::Small, Vec2::new(100.0, 100.0), 1.0);
        world.asteroids[0].vel = Vec2::ZERO;
        let id = world.next_entity_id();
        let mut bullet = Bullet::new(id, Vec2::new(100.0, 100.0), 0.0);
        bullet.vel = Vec2::ZERO;
        world.bullets.push(bullet);

        let report = tick(&mut world, &TickInput::default());
        assert_eq!(report.points, 100);
        assert_eq!(world.run.score(), 100);
        // Field cleared: the next level is built in the same tick
        assert_eq!(report.spawns.level_started, Some(2));
        assert_eq!(world.asteroids.len(), 3);
    }

    #[test]
    fn test_last_life_reports_exhaustion() {
        let mut world = running_world(4);
        for _ in 0..STARTING_LIVES - 1 {
            world.run.tracker.lose_life();
        }
        world.ship.pos = world.field.center();
        world.asteroids[0].pos = world.field.center();
        world.asteroids[0].vel = Vec2::ZERO;
        world.ship.vel = Vec2::ZERO;

        let report = tick(&mut world, &TickInput::default());
        assert!(report.collisions.ship_hit.is_some());
        assert_eq!(report.outcome, RunOutcome::LivesExhausted { final_score: 0 });
    }

    #[test]
    fn test_siren_pulses_while_saucer_present() {
        let mut world = running_world(8);
        world.run.level = 2;
        world.run.saucer_countdown = 1;
        // Keep the field busy so the level does not advance
        for rock in &mut world.asteroids {
            rock.pos = Vec2::new(50.0, 50.0);
            rock.vel = Vec2::ZERO;
        }
        world.ship.pos = Vec2::new(700.0, 500.0);

        tick(&mut world, &TickInput::default());
        assert_eq!(world.saucers.len(), 1);
        world.saucers[0].pos.y = 300.0;
        let cues = world.drain_events();
        assert!(cues.contains(&AudioCue::SirenStart));

        let mut pulses = 0;
        for _ in 0..SIREN_PERIOD_TICKS {
            world.ship.pos = Vec2::new(700.0, 500.0);
            tick(&mut world, &TickInput::default());
            pulses += world
                .drain_events()
                .iter()
                .filter(|c| **c == AudioCue::SirenPulse)
                .count();
        }
        assert_eq!(pulses, 1);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed produce identical runs
        let mut world1 = running_world(99999);
        let mut world2 = running_world(99999);

        let inputs = [
            TickInput {
                thrust: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                rotate_left: true,
                ..Default::default()
            },
            TickInput {
                hyperspace: true,
                ..Default::default()
            },
            TickInput {
                rotate_delta: 0.3,
                ..Default::default()
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut world1, input);
                tick(&mut world2, input);
            }
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.ship.pos, world2.ship.pos);
        assert_eq!(world1.asteroids.len(), world2.asteroids.len());
        assert_eq!(world1.run.score(), world2.run.score());
        assert_eq!(world1.drain_events(), world2.drain_events());
    }
}
