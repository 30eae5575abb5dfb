//! Level progression and saucer arrivals
//!
//! Runs once per tick after collisions: counts down the level banner,
//! advances the level when the field is clear and times saucer entries.

use glam::Vec2;
use rand::Rng;

use super::events::AudioCue;
use super::state::{AsteroidSize, SAUCER_ENTRY_OFFSET, SAUCER_SPAWN_TICKS, Saucer};
use super::world::World;
use crate::consts::LEVEL_BANNER_TICKS;

/// Asteroids never spawn this close to the ship
pub const SAFE_SPAWN_DISTANCE: f32 = 100.0;
/// Saucers only appear from this level on
pub const SAUCER_MIN_LEVEL: u32 = 2;
/// Resampling cap for safe spawn points on very small fields
const SPAWN_ATTEMPTS: usize = 256;

/// How a level is populated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSpec {
    /// Number of large asteroids
    pub asteroid_count: usize,
    /// Drift multiplier for the level's starting asteroids
    pub speed_mult: f32,
}

/// Levels past the end of the table reuse the last row
pub const LEVEL_TABLE: [LevelSpec; 3] = [
    LevelSpec {
        asteroid_count: 2,
        speed_mult: 1.0,
    },
    LevelSpec {
        asteroid_count: 3,
        speed_mult: 1.2,
    },
    LevelSpec {
        asteroid_count: 4,
        speed_mult: 1.4,
    },
];

/// Table row for a 1-based level number
pub fn level_spec(level: u32) -> LevelSpec {
    debug_assert!(level >= 1, "levels are 1-based");
    let idx = (level.max(1) as usize - 1).min(LEVEL_TABLE.len() - 1);
    LEVEL_TABLE[idx]
}

/// What the spawn step changed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnReport {
    /// New level number if the field was cleared
    pub level_started: Option<u32>,
    /// Id of a saucer that entered
    pub saucer_spawned: Option<u32>,
}

/// Populate the current level: show the banner, reset the saucer timer and
/// place large asteroids away from the ship
pub fn start_level(world: &mut World) {
    let spec = level_spec(world.run.level);
    world.asteroids.clear();
    world.run.level_banner_ticks = LEVEL_BANNER_TICKS;
    world.run.saucer_countdown = SAUCER_SPAWN_TICKS;

    for _ in 0..spec.asteroid_count {
        let pos = safe_spawn_point(world);
        world.spawn_asteroid(AsteroidSize::Large, pos, spec.speed_mult);
    }

    log::info!(
        "Level {} started: {} asteroids at {:.1}x speed",
        world.run.level,
        spec.asteroid_count,
        spec.speed_mult
    );
}

/// Random field point farther than `SAFE_SPAWN_DISTANCE` from the ship
///
/// Falls back to the farthest sample if the field is too small to satisfy
/// the distance within the attempt cap.
fn safe_spawn_point(world: &mut World) -> Vec2 {
    let field = world.field;
    let ship = world.ship.pos;
    let mut best = field.random_point(world.rng());
    for _ in 0..SPAWN_ATTEMPTS {
        if best.distance(ship) > SAFE_SPAWN_DISTANCE {
            return best;
        }
        let candidate = field.random_point(world.rng());
        if candidate.distance(ship) > best.distance(ship) {
            best = candidate;
        }
    }
    log::warn!("No spawn point beyond {} units on this field", SAFE_SPAWN_DISTANCE);
    best
}

/// Per-tick spawn step (after collision resolution)
pub fn update_spawns(world: &mut World) -> SpawnReport {
    let mut report = SpawnReport::default();

    world.run.level_banner_ticks = world.run.level_banner_ticks.saturating_sub(1);

    if world.asteroids.is_empty() {
        world.run.level += 1;
        start_level(world);
        report.level_started = Some(world.run.level);
    }

    if world.run.level >= SAUCER_MIN_LEVEL && world.saucers.is_empty() {
        world.run.saucer_countdown = world.run.saucer_countdown.saturating_sub(1);
        if world.run.saucer_countdown == 0 {
            report.saucer_spawned = Some(spawn_saucer(world));
            world.run.saucer_countdown = SAUCER_SPAWN_TICKS;
        }
    }

    report
}

/// Send a saucer in from a random side at a random height
pub fn spawn_saucer(world: &mut World) -> u32 {
    let field = world.field;
    let rng = world.rng();
    let from_left = rng.random_bool(0.5);
    let y = rng.random::<f32>() * field.height;

    let (x, direction) = if from_left {
        (-SAUCER_ENTRY_OFFSET, 1.0)
    } else {
        (field.width + SAUCER_ENTRY_OFFSET, -1.0)
    };

    let id = world.next_entity_id();
    world.saucers.push(Saucer::new(id, Vec2::new(x, y), direction));
    world.emit(AudioCue::SaucerSpawn);
    world.start_siren();
    log::info!("Saucer {} entering from the {}", id, if from_left { "left" } else { "right" });
    id
}
