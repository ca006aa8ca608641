//! Game entities: the player ship, bullets from both sides, and the
//! descending enemies. All randomness comes through an injected `Rng` so
//! callers control determinism.

use rand::Rng;

use crate::geometry::{Rect, Vec2};

// ── Tuning constants (field units) ────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 90.0;
pub const PLAYER_HEIGHT: f32 = 100.0;

pub const ENEMY_SIZE: f32 = 50.0;
/// Enemies enter the field slightly above the top edge.
pub const ENEMY_SPAWN_Y: f32 = -20.0;
pub const ENEMY_FALL_VELOCITY: Vec2 = Vec2::new(0.0, 5.0);

pub const BULLET_WIDTH: f32 = 1.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const PLAYER_BULLET_VELOCITY: Vec2 = Vec2::new(0.0, -20.0);
pub const ENEMY_BULLET_VELOCITY: Vec2 = Vec2::new(0.0, 10.0);

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Who fired a bullet; doubles as its color tag on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    pub velocity: Vec2,
    pub kind: BulletKind,
}

impl Bullet {
    /// Derive a bullet from whatever fired it: a 1×10 box whose spawn point
    /// is the source rectangle's center.
    pub fn from_source(source: &Rect, velocity: Vec2, kind: BulletKind) -> Bullet {
        let mut rect = source.clone();
        rect.translate(Vec2::new(source.width / 2.0, source.height / 2.0));
        rect.resize(BULLET_WIDTH, BULLET_HEIGHT);
        Bullet { rect, velocity, kind }
    }

    /// Apply the velocity once.
    pub fn advance(&mut self) {
        self.rect.translate(self.velocity);
    }

    pub fn overlaps(&self, target: &Rect) -> bool {
        self.rect.overlaps(target)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    /// The ship starts in the bottom-left corner of the field.
    pub fn new(field: &Rect) -> Player {
        Player {
            rect: Rect::new(
                0.0,
                field.height - PLAYER_HEIGHT,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
        }
    }

    /// Horizontal slide; the ship never leaves its row.
    pub fn slide(&mut self, dx: f32) {
        self.rect.translate(Vec2::new(dx, 0.0));
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Shots this enemy has fired and still owns.
    pub bullets: Vec<Bullet>,
}

impl Enemy {
    /// A fresh enemy at a random x, just above the top edge, falling.
    pub fn spawn(field_width: f32, rng: &mut impl Rng) -> Enemy {
        Enemy {
            rect: Rect::new(
                rng.gen_range(0.0..field_width),
                ENEMY_SPAWN_Y,
                ENEMY_SIZE,
                ENEMY_SIZE,
            ),
            velocity: ENEMY_FALL_VELOCITY,
            bullets: Vec::new(),
        }
    }

    /// One frame of enemy behavior: drift down, maybe fire, move own shots
    /// and drop the ones that left the field.
    pub fn advance(&mut self, field: &Rect, rng: &mut impl Rng) {
        self.rect.translate(self.velocity);

        // 3 in 100 per frame.
        if rng.gen_range(1..=100) > 97 {
            self.bullets.push(Bullet::from_source(
                &self.rect,
                ENEMY_BULLET_VELOCITY,
                BulletKind::Enemy,
            ));
        }

        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets
            .retain(|b| b.rect.x >= 0.0 && b.rect.x <= field.width && b.rect.y <= field.height);
    }

    /// The enemy's threat surface: its hull or any shot it owns.
    pub fn threatens(&self, target: &Rect) -> bool {
        self.bullets.iter().any(|b| b.overlaps(target)) || self.rect.overlaps(target)
    }
}
