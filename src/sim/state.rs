//! Entity types and per-run bookkeeping
//!
//! Everything the world owns lives here. Velocities are in field units per
//! tick; angles are radians.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::score::ScoreTracker;
use crate::consts::*;
use crate::{normalize_angle, polar_to_cartesian};

/// Playfield rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "field must have positive size");
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds check
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Toroidal wrap at the exact boundary (ship)
    pub fn wrap_exact(&self, mut pos: Vec2) -> Vec2 {
        if pos.x < 0.0 {
            pos.x = self.width;
        } else if pos.x > self.width {
            pos.x = 0.0;
        }
        if pos.y < 0.0 {
            pos.y = self.height;
        } else if pos.y > self.height {
            pos.y = 0.0;
        }
        pos
    }

    /// Toroidal wrap once the body has fully cleared an edge (asteroids)
    pub fn wrap_with_margin(&self, mut pos: Vec2, margin: f32) -> Vec2 {
        if pos.x < -margin {
            pos.x = self.width + margin;
        } else if pos.x > self.width + margin {
            pos.x = -margin;
        }
        if pos.y < -margin {
            pos.y = self.height + margin;
        } else if pos.y > self.height + margin {
            pos.y = -margin;
        }
        pos
    }

    /// Uniformly random point inside the field
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (0 = +x, -π/2 = up on screen)
    pub heading: f32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Ticks until hyperspace is allowed again
    pub hyperspace_cooldown: u32,
}

impl Ship {
    /// Fresh ship at rest, pointing up
    pub fn spawn_at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: SHIP_START_HEADING,
            fire_cooldown: 0,
            hyperspace_cooldown: 0,
        }
    }

    pub fn heading_vector(&self) -> Vec2 {
        polar_to_cartesian(1.0, self.heading)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn rotate(&mut self, delta: f32) {
        self.heading = normalize_angle(self.heading + delta);
    }

    /// Apply one tick of thrust along the heading, then clamp to max speed
    pub fn thrust(&mut self) {
        self.vel += self.heading_vector() * SHIP_THRUST;
        self.vel = self.vel.clamp_length_max(SHIP_MAX_SPEED);
        debug_assert!(self.speed() <= SHIP_MAX_SPEED + 1e-3);
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks before expiry
    pub life: u32,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, heading: f32) -> Self {
        Self {
            id,
            pos,
            vel: polar_to_cartesian(BULLET_SPEED, heading),
            life: BULLET_LIFE_TICKS,
        }
    }

    /// Bullets never wrap: they die at life 0 or outside the field
    pub fn is_expired(&self, field: &Field) -> bool {
        self.life == 0 || !field.contains(self.pos)
    }
}

/// Static properties of an asteroid size class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTraits {
    pub radius: f32,
    pub score: u64,
    pub child: Option<AsteroidSize>,
}

/// Asteroid size classes (radius strictly decreases down the chain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

const LARGE: SizeTraits = SizeTraits {
    radius: 40.0,
    score: 20,
    child: Some(AsteroidSize::Medium),
};
const MEDIUM: SizeTraits = SizeTraits {
    radius: 25.0,
    score: 50,
    child: Some(AsteroidSize::Small),
};
const SMALL: SizeTraits = SizeTraits {
    radius: 15.0,
    score: 100,
    child: None,
};

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small];

    pub const fn traits(self) -> &'static SizeTraits {
        match self {
            AsteroidSize::Large => &LARGE,
            AsteroidSize::Medium => &MEDIUM,
            AsteroidSize::Small => &SMALL,
        }
    }

    pub const fn radius(self) -> f32 {
        self.traits().radius
    }

    pub const fn score(self) -> u64 {
        self.traits().score
    }

    /// Size of the two fragments produced when destroyed (None for small)
    pub const fn child(self) -> Option<AsteroidSize> {
        self.traits().child
    }
}

/// Maximum drift per velocity component at spawn
pub const ASTEROID_DRIFT: f32 = 2.0;
/// Maximum spin per tick
pub const ASTEROID_SPIN: f32 = 0.05;
/// Silhouette vertex count
pub const ASTEROID_VERTICES: usize = 8;
/// Per-vertex radius jitter (±20%)
pub const ASTEROID_JITTER: f32 = 0.2;

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Rotation per tick
    pub spin: f32,
    /// Silhouette relative to the center, fixed at creation
    outline: Vec<Vec2>,
}

impl Asteroid {
    /// Random drift, spin and silhouette; drift is scaled by `speed_mult`
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        size: AsteroidSize,
        pos: Vec2,
        speed_mult: f32,
        rng: &mut R,
    ) -> Self {
        let vel = Vec2::new(
            rng.random_range(-ASTEROID_DRIFT..ASTEROID_DRIFT),
            rng.random_range(-ASTEROID_DRIFT..ASTEROID_DRIFT),
        ) * speed_mult;
        let spin = rng.random_range(-ASTEROID_SPIN..ASTEROID_SPIN);

        let radius = size.radius();
        let outline = (0..ASTEROID_VERTICES)
            .map(|i| {
                let theta = i as f32 / ASTEROID_VERTICES as f32 * std::f32::consts::TAU;
                let r = radius * rng.random_range(1.0 - ASTEROID_JITTER..1.0 + ASTEROID_JITTER);
                polar_to_cartesian(r, theta)
            })
            .collect();

        Self {
            id,
            pos,
            vel,
            size,
            rotation: 0.0,
            spin,
            outline,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }
}

/// Particle lifetime in ticks
pub const PARTICLE_MAX_LIFE: u32 = 30;
/// Maximum speed per velocity component at spawn
pub const PARTICLE_SPEED: f32 = 3.0;
/// Velocity damping per tick
pub const PARTICLE_DAMPING: f32 = 0.98;

/// A cosmetic spark (never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
            ),
            life: PARTICLE_MAX_LIFE,
        }
    }

    /// Fade factor for rendering (1 = fresh, 0 = dead)
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_MAX_LIFE as f32
    }
}

pub const SAUCER_SPEED: f32 = 2.0;
pub const SAUCER_RADIUS: f32 = 15.0;
/// Oscillation phase advance per tick
pub const SAUCER_WOBBLE_RATE: f32 = 0.05;
/// Vertical step scale applied to sin(phase)
pub const SAUCER_WOBBLE_AMPLITUDE: f32 = 0.5;
/// Saucers enter this far outside the chosen edge
pub const SAUCER_ENTRY_OFFSET: f32 = 30.0;
/// Saucers are removed this far beyond the left/right edge
pub const SAUCER_EXIT_MARGIN: f32 = 50.0;

/// A flying saucer crossing the field horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub id: u32,
    pub pos: Vec2,
    /// +1 moves right, -1 moves left
    pub direction: f32,
    /// Vertical oscillation phase
    pub phase: f32,
}

impl Saucer {
    pub fn new(id: u32, pos: Vec2, direction: f32) -> Self {
        Self {
            id,
            pos,
            direction: direction.signum(),
            phase: 0.0,
        }
    }

    pub fn radius(&self) -> f32 {
        SAUCER_RADIUS
    }

    /// Saucers never wrap
    pub fn is_off_field(&self, field: &Field) -> bool {
        self.pos.x < -SAUCER_EXIT_MARGIN || self.pos.x > field.width + SAUCER_EXIT_MARGIN
    }
}

/// Saucer spawn interval in ticks (10 seconds)
pub const SAUCER_SPAWN_TICKS: u32 = 10 * TICKS_PER_SECOND;

/// Per-run bookkeeping that is not an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Score and lives
    pub tracker: ScoreTracker,
    /// Current level (1-based)
    pub level: u32,
    /// Ticks of remaining respawn invulnerability
    pub invulnerable_ticks: u32,
    /// Ticks until the next saucer may arrive
    pub saucer_countdown: u32,
    /// Ticks remaining on the "LEVEL n" banner
    pub level_banner_ticks: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            tracker: ScoreTracker::default(),
            level: 1,
            invulnerable_ticks: 0,
            saucer_countdown: SAUCER_SPAWN_TICKS,
            level_banner_ticks: 0,
        }
    }
}

impl RunState {
    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    pub fn lives(&self) -> u8 {
        self.tracker.lives()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Whole seconds left on the respawn countdown (rounded up)
    pub fn respawn_seconds(&self) -> u32 {
        self.invulnerable_ticks.div_ceil(TICKS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_size_table_strictly_decreasing() {
        assert!(AsteroidSize::Large.radius() > AsteroidSize::Medium.radius());
        assert!(AsteroidSize::Medium.radius() > AsteroidSize::Small.radius());
        assert_eq!(AsteroidSize::Large.child(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.child(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.child(), None);
    }

    #[test]
    fn test_asteroid_outline_jitter() {
        let mut rng = Pcg32::seed_from_u64(7);
        for size in AsteroidSize::ALL {
            let rock = Asteroid::new(1, size, Vec2::ZERO, 1.0, &mut rng);
            assert_eq!(rock.outline().len(), ASTEROID_VERTICES);
            for v in rock.outline() {
                let r = v.length();
                assert!(r >= size.radius() * 0.8 - 1e-3 && r <= size.radius() * 1.2 + 1e-3);
            }
        }
    }

    #[test]
    fn test_asteroid_speed_multiplier() {
        let mut a = Pcg32::seed_from_u64(3);
        let mut b = Pcg32::seed_from_u64(3);
        let slow = Asteroid::new(1, AsteroidSize::Large, Vec2::ZERO, 1.0, &mut a);
        let fast = Asteroid::new(1, AsteroidSize::Large, Vec2::ZERO, 1.4, &mut b);
        assert!((fast.vel - slow.vel * 1.4).length() < 1e-4);
    }

    #[test]
    fn test_ship_wraps_at_exact_edges() {
        let field = Field::new(800.0, 600.0);
        assert_eq!(field.wrap_exact(Vec2::new(800.5, 300.0)), Vec2::new(0.0, 300.0));
        assert_eq!(field.wrap_exact(Vec2::new(-0.5, 300.0)), Vec2::new(800.0, 300.0));
        assert_eq!(field.wrap_exact(Vec2::new(100.0, 600.5)), Vec2::new(100.0, 0.0));
        assert_eq!(field.wrap_exact(Vec2::new(100.0, -0.5)), Vec2::new(100.0, 600.0));
    }

    #[test]
    fn test_asteroid_wraps_after_clearing_edge() {
        let field = Field::new(800.0, 600.0);
        // Still partly visible: no wrap yet
        assert_eq!(field.wrap_with_margin(Vec2::new(830.0, 10.0), 40.0), Vec2::new(830.0, 10.0));
        assert_eq!(field.wrap_with_margin(Vec2::new(841.0, 10.0), 40.0), Vec2::new(-40.0, 10.0));
        assert_eq!(field.wrap_with_margin(Vec2::new(10.0, -41.0), 40.0), Vec2::new(10.0, 640.0));
        assert_eq!(field.wrap_with_margin(Vec2::new(-41.0, 10.0), 40.0), Vec2::new(840.0, 10.0));
        assert_eq!(field.wrap_with_margin(Vec2::new(10.0, 641.0), 40.0), Vec2::new(10.0, -40.0));
    }

    #[test]
    fn test_bullet_expiry() {
        let field = Field::default();
        let mut bullet = Bullet::new(1, Vec2::new(10.0, 10.0), 0.0);
        assert!(!bullet.is_expired(&field));
        bullet.life = 0;
        assert!(bullet.is_expired(&field));
        let outside = Bullet::new(2, Vec2::new(-1.0, 10.0), 0.0);
        assert!(outside.is_expired(&field));
    }

    #[test]
    fn test_saucer_exit_margin() {
        let field = Field::default();
        let mut saucer = Saucer::new(1, Vec2::new(-SAUCER_ENTRY_OFFSET, 100.0), 1.0);
        assert!(!saucer.is_off_field(&field));
        saucer.pos.x = field.width + SAUCER_EXIT_MARGIN + 0.1;
        assert!(saucer.is_off_field(&field));
    }

    #[test]
    fn test_respawn_seconds_round_up() {
        let mut run = RunState::default();
        run.invulnerable_ticks = INVULNERABLE_TICKS;
        assert_eq!(run.respawn_seconds(), 3);
        run.invulnerable_ticks = 61;
        assert_eq!(run.respawn_seconds(), 2);
        run.invulnerable_ticks = 1;
        assert_eq!(run.respawn_seconds(), 1);
    }

    proptest! {
        #[test]
        fn prop_thrust_never_exceeds_cap(
            steps in prop::collection::vec((any::<bool>(), -0.5f32..0.5), 1..400)
        ) {
            let mut ship = Ship::spawn_at(Vec2::new(400.0, 300.0));
            for (thrust, turn) in steps {
                ship.rotate(turn);
                if thrust {
                    ship.thrust();
                }
                prop_assert!(ship.speed() <= SHIP_MAX_SPEED + 1e-3);
            }
        }

        #[test]
        fn prop_wrap_mirrors_horizontal_crossing(y in 0.0f32..600.0, overshoot in 0.01f32..5.0) {
            let field = Field::new(800.0, 600.0);
            let right = field.wrap_exact(Vec2::new(field.width + overshoot, y));
            prop_assert_eq!(right, Vec2::new(0.0, y));
            let left = field.wrap_exact(Vec2::new(-overshoot, y));
            prop_assert_eq!(left, Vec2::new(field.width, y));
        }

        #[test]
        fn prop_wrap_mirrors_vertical_crossing(x in 0.0f32..800.0, overshoot in 0.01f32..5.0) {
            let field = Field::new(800.0, 600.0);
            let bottom = field.wrap_exact(Vec2::new(x, field.height + overshoot));
            prop_assert_eq!(bottom, Vec2::new(x, 0.0));
            let top = field.wrap_exact(Vec2::new(x, -overshoot));
            prop_assert_eq!(top, Vec2::new(x, field.height));
        }

        #[test]
        fn prop_margin_wrap_mirrors_every_edge(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            margin in 1.0f32..50.0,
            overshoot in 0.01f32..5.0,
        ) {
            let field = Field::new(800.0, 600.0);
            let out = margin + overshoot;
            let right = field.wrap_with_margin(Vec2::new(field.width + out, y), margin);
            prop_assert_eq!(right, Vec2::new(-margin, y));
            let left = field.wrap_with_margin(Vec2::new(-out, y), margin);
            prop_assert_eq!(left, Vec2::new(field.width + margin, y));
            let bottom = field.wrap_with_margin(Vec2::new(x, field.height + out), margin);
            prop_assert_eq!(bottom, Vec2::new(x, -margin));
            let top = field.wrap_with_margin(Vec2::new(x, -out), margin);
            prop_assert_eq!(top, Vec2::new(x, field.height + margin));
        }
    }
}
