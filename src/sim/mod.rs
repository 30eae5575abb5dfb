//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per call, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids for bookkeeping)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod events;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionReport, ShipHit, circles_overlap, resolve_collisions};
pub use events::{AudioCue, SirenCycle};
pub use score::{RunOutcome, ScoreEvent, ScoreTracker};
pub use spawn::{LEVEL_TABLE, LevelSpec, SpawnReport, level_spec, start_level, update_spawns};
pub use state::{Asteroid, AsteroidSize, Bullet, Field, Particle, RunState, Saucer, Ship};
pub use tick::{TickInput, TickReport, tick};
pub use world::World;
