//! Render snapshots
//!
//! A frozen, serializable view of one frame. Drawing layers consume this and
//! never touch the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SHIP_COLLISION_RADIUS;
use crate::game::Screen;
use crate::sim::World;

/// Bullets collide as points but are drawn as small dots
pub const BULLET_DRAW_RADIUS: f32 = 1.5;

/// What a drawable is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawKind {
    Ship,
    Bullet,
    Asteroid,
    Saucer,
    Particle,
}

/// One entity to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: DrawKind,
    /// Entity id (particles and the ship have none)
    pub id: Option<u32>,
    pub pos: Vec2,
    /// Orientation in radians
    pub rotation: f32,
    /// Nominal size
    pub radius: f32,
    /// Silhouette relative to `pos`, unrotated (asteroids only)
    pub outline: Vec<Vec2>,
    /// 1 = opaque
    pub alpha: f32,
}

impl Drawable {
    fn simple(kind: DrawKind, id: Option<u32>, pos: Vec2, rotation: f32, radius: f32) -> Self {
        Self {
            kind,
            id,
            pos,
            rotation,
            radius,
            outline: Vec::new(),
            alpha: 1.0,
        }
    }
}

/// Text overlays and their parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlays {
    /// "LEVEL n" banner
    pub level_banner: Option<u32>,
    /// "Respawning in n..." countdown
    pub respawn_seconds: Option<u32>,
    /// "GAME OVER" with the final score
    pub game_over_score: Option<u64>,
    /// Initials typed so far on the name entry screen
    pub initials: Option<String>,
    /// Formatted leaderboard rows on the attract screen
    pub board_rows: Vec<String>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    pub field_width: f32,
    pub field_height: f32,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Back to front: ship, bullets, asteroids, saucers, particles
    pub drawables: Vec<Drawable>,
    pub overlays: Overlays,
}

impl RenderSnapshot {
    pub fn capture(world: &World, screen: Screen, overlays: Overlays) -> Self {
        Self {
            screen,
            field_width: world.field.width,
            field_height: world.field.height,
            score: world.run.score(),
            lives: world.run.lives(),
            level: world.run.level,
            drawables: drawables(world),
            overlays,
        }
    }

    pub fn count(&self, kind: DrawKind) -> usize {
        self.drawables.iter().filter(|d| d.kind == kind).count()
    }
}

/// Every live entity in draw order
pub fn drawables(world: &World) -> Vec<Drawable> {
    let mut out = Vec::with_capacity(
        1 + world.bullets.len() + world.asteroids.len() + world.saucers.len() + world.particles.len(),
    );

    out.push(Drawable::simple(
        DrawKind::Ship,
        None,
        world.ship.pos,
        world.ship.heading,
        SHIP_COLLISION_RADIUS,
    ));

    out.extend(world.bullets.iter().map(|b| {
        Drawable::simple(DrawKind::Bullet, Some(b.id), b.pos, 0.0, BULLET_DRAW_RADIUS)
    }));

    out.extend(world.asteroids.iter().map(|a| Drawable {
        outline: a.outline().to_vec(),
        ..Drawable::simple(DrawKind::Asteroid, Some(a.id), a.pos, a.rotation, a.radius())
    }));

    out.extend(world.saucers.iter().map(|s| {
        Drawable::simple(DrawKind::Saucer, Some(s.id), s.pos, 0.0, s.radius())
    }));

    out.extend(world.particles.iter().map(|p| Drawable {
        alpha: p.alpha(),
        ..Drawable::simple(DrawKind::Particle, None, p.pos, 0.0, 1.0)
    }));

    out
}
