//! Audio cue vocabulary emitted by the simulation
//!
//! The engine never synthesizes sound. It queues named cues each tick and the
//! host forwards them to an audio collaborator.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Discrete audio events, in the order they were raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioCue {
    /// Ship applied thrust this tick
    Thrust,
    /// A bullet left the ship
    Fire,
    /// Bullet destroyed an asteroid
    ExplosionAsteroid,
    /// A saucer was destroyed (by bullet or by ramming the ship)
    ExplosionSaucer,
    /// Ship lost a life
    ExplosionShip,
    /// A saucer entered the field
    SaucerSpawn,
    /// Siren turned on (only on inactive -> active)
    SirenStart,
    /// Siren turned off (only on active -> inactive)
    SirenStop,
    /// Periodic siren re-arm while active
    SirenPulse,
    /// Ship jumped through hyperspace
    Hyperspace,
}

/// Ticks between siren modulation re-arms
pub const SIREN_PERIOD_TICKS: u32 = TICKS_PER_SECOND;

/// Tick-counted siren task owned by the world
///
/// Start and stop are idempotent and report whether the state actually
/// changed, so the matching cue is emitted exactly once per transition.
#[derive(Debug, Clone, Default)]
pub struct SirenCycle {
    active: bool,
    ticks_until_pulse: u32,
}

impl SirenCycle {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the siren was off and is now on
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.ticks_until_pulse = SIREN_PERIOD_TICKS;
        true
    }

    /// Returns true if the siren was on and is now off
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.ticks_until_pulse = 0;
        true
    }

    /// Advance one tick; returns true when the modulation should re-arm
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks_until_pulse = self.ticks_until_pulse.saturating_sub(1);
        if self.ticks_until_pulse == 0 {
            self.ticks_until_pulse = SIREN_PERIOD_TICKS;
            return true;
        }
        false
    }
}
