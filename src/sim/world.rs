//! World container
//!
//! The `World` exclusively owns every live entity plus the run bookkeeping.
//! Components receive `&mut World` for the duration of their step; nothing
//! else mutates it. Renderers and audio collaborators only ever see
//! snapshots and drained cue lists.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::{AudioCue, SirenCycle};
use super::spawn;
use super::state::{Asteroid, AsteroidSize, Bullet, Field, Particle, RunState, Saucer, Ship};

/// Particles per explosion
pub const EXPLOSION_PARTICLES: usize = 10;

/// Session state for one engine instance
#[derive(Debug, Clone)]
pub struct World {
    /// Field geometry (fixed for the world's lifetime)
    pub field: Field,
    /// The single ship (re-created in place on respawn)
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub saucers: Vec<Saucer>,
    pub particles: Vec<Particle>,
    /// Score, lives, level and countdowns
    pub run: RunState,
    /// Ticks simulated since the run started
    pub time_ticks: u64,
    siren: SirenCycle,
    rng: Pcg32,
    events: Vec<AudioCue>,
    next_id: u32,
}

impl World {
    /// Empty world with the ship parked at the center; no level is built yet
    pub fn new(field: Field, seed: u64) -> Self {
        Self {
            field,
            ship: Ship::spawn_at(field.center()),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            saucers: Vec::new(),
            particles: Vec::new(),
            run: RunState::default(),
            time_ticks: 0,
            siren: SirenCycle::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Start a fresh run: tear down the previous run's siren, clear every
    /// collection, reset score/lives/level and build level 1
    pub fn reset_run(&mut self) {
        self.stop_siren();

        self.bullets.clear();
        self.asteroids.clear();
        self.saucers.clear();
        self.particles.clear();
        self.run = RunState::default();
        self.time_ticks = 0;
        self.ship = Ship::spawn_at(self.field.center());

        log::info!("Run started on {}x{} field", self.field.width, self.field.height);
        spawn::start_level(self);
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Queue an audio cue for the host
    pub fn emit(&mut self, cue: AudioCue) {
        self.events.push(cue);
    }

    /// Cues raised since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[AudioCue] {
        &self.events
    }

    pub fn siren_active(&self) -> bool {
        self.siren.is_active()
    }

    pub fn start_siren(&mut self) {
        if self.siren.start() {
            self.emit(AudioCue::SirenStart);
        }
    }

    pub fn stop_siren(&mut self) {
        if self.siren.stop() {
            self.emit(AudioCue::SirenStop);
        }
    }

    /// Advance the siren task by one tick
    pub(crate) fn tick_siren(&mut self) {
        if self.siren.tick() {
            self.emit(AudioCue::SirenPulse);
        }
    }

    /// Spawn `count` particles at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize) {
        for _ in 0..count {
            let particle = Particle::new(pos, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Create an asteroid and append it; returns its id
    pub fn spawn_asteroid(&mut self, size: AsteroidSize, pos: Vec2, speed_mult: f32) -> u32 {
        let id = self.next_entity_id();
        let asteroid = Asteroid::new(id, size, pos, speed_mult, &mut self.rng);
        self.asteroids.push(asteroid);
        id
    }

    /// Put the ship back at the center at rest with the default heading
    pub fn respawn_ship(&mut self) {
        self.ship = Ship::spawn_at(self.field.center());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STARTING_LIVES;

    #[test]
    fn test_entity_ids_increase() {
        let mut world = World::new(Field::default(), 1);
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_reset_run_builds_level_one() {
        let mut world = World::new(Field::default(), 42);
        world.reset_run();
        assert_eq!(world.run.level, 1);
        assert_eq!(world.run.lives(), STARTING_LIVES);
        assert_eq!(world.run.score(), 0);
        assert_eq!(world.asteroids.len(), 2);
        assert!(world.bullets.is_empty() && world.saucers.is_empty());
    }

    #[test]
    fn test_reset_stops_siren_before_rebuild() {
        let mut world = World::new(Field::default(), 5);
        world.start_siren();
        world.drain_events();

        world.reset_run();
        assert!(!world.siren_active());
        assert_eq!(world.drain_events(), vec![AudioCue::SirenStop]);

        // A second reset has nothing to tear down
        world.reset_run();
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut world = World::new(Field::default(), 1);
        world.emit(AudioCue::Fire);
        world.emit(AudioCue::Thrust);
        assert_eq!(world.drain_events(), vec![AudioCue::Fire, AudioCue::Thrust]);
        assert!(world.pending_events().is_empty());
    }

    #[test]
    fn test_burst_spawns_particles() {
        let mut world = World::new(Field::default(), 1);
        world.spawn_burst(Vec2::new(10.0, 10.0), EXPLOSION_PARTICLES);
        assert_eq!(world.particles.len(), EXPLOSION_PARTICLES);
    }
}
