//! Vector Rocks - a wrap-around asteroid field arcade engine
//!
//! Core modules:
//! - `sim`: Simulation engine (world, physics, collisions, spawning, scoring)
//! - `game`: Screen state machine (attract board, play, name entry, game over)
//! - `platform`: Input normalization (keyboard mapping, touch gestures)
//! - `highscores` / `persistence`: Leaderboard rules and score store backends
//! - `renderer`: Read-only render snapshots for an external drawing layer
//! - `audio`: Audio cue dispatch to an external synthesizer

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Screen};
pub use highscores::{HighScoreEntry, HighScores, ScoreBoard};
pub use settings::{FieldLayout, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation cadence (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default field dimensions (desktop layout)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship handling, in units per tick
    pub const SHIP_THRUST: f32 = 0.3;
    pub const SHIP_FRICTION: f32 = 0.98;
    pub const SHIP_MAX_SPEED: f32 = 8.0;
    /// Keyboard rotation per tick (radians)
    pub const SHIP_TURN_RATE: f32 = 0.2;
    /// Ship points up at spawn
    pub const SHIP_START_HEADING: f32 = -std::f32::consts::FRAC_PI_2;
    /// Added to the target's radius for ship collisions
    pub const SHIP_COLLISION_RADIUS: f32 = 10.0;

    /// Cooldowns (ticks)
    pub const FIRE_COOLDOWN_TICKS: u32 = 10;
    pub const HYPERSPACE_COOLDOWN_TICKS: u32 = 2 * TICKS_PER_SECOND;

    /// Bullets are points travelling at a fixed speed
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_LIFE_TICKS: u32 = 60;
    pub const BULLET_RADIUS: f32 = 0.0;

    /// Run defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const INVULNERABLE_TICKS: u32 = 3 * TICKS_PER_SECOND;
    pub const LEVEL_BANNER_TICKS: u32 = TICKS_PER_SECOND;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Smallest absolute difference between two angles, in [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
