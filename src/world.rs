//! The simulation core. `World` owns every entity collection and runs the
//! per-tick step: spawn, collide, cull, compact, advance. The caller owns
//! the clock and the RNG, so a test can drive whole sessions without
//! touching wall time.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::entities::{Bullet, BulletKind, Enemy, Player, PLAYER_BULLET_VELOCITY};
use crate::geometry::Rect;
use crate::score::Score;

/// How often a fresh enemy enters the field.
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: ticks stop for good, no restart.
    GameOver,
}

pub struct World {
    pub field: Rect,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Bullets the player has fired. Enemy bullets live with their enemy.
    pub bullets: Vec<Bullet>,
    pub score: Score,
    pub status: GameStatus,
    last_spawn: Duration,
    spawn_interval: Duration,
    last_pointer_x: f32,
}

impl World {
    pub fn new(field_width: f32, field_height: f32) -> World {
        let field = Rect::new(0.0, 0.0, field_width, field_height);
        let player = Player::new(&field);
        World {
            field,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            score: Score::new(),
            status: GameStatus::Running,
            last_spawn: Duration::ZERO,
            spawn_interval: SPAWN_INTERVAL,
            last_pointer_x: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    // ── Input handlers (run between ticks, same thread) ──────────────────────

    /// Fire one player bullet from the ship, straight up.
    pub fn fire(&mut self) {
        self.bullets.push(Bullet::from_source(
            &self.player.rect,
            PLAYER_BULLET_VELOCITY,
            BulletKind::Player,
        ));
    }

    /// The ship follows the pointer's horizontal delta. The previous x
    /// updates on every event.
    pub fn pointer_moved(&mut self, x: f32) {
        self.player.slide(x - self.last_pointer_x);
        self.last_pointer_x = x;
    }

    /// A pointer press fires exactly like the keyboard.
    pub fn pointer_pressed(&mut self) {
        self.fire();
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    /// Advance the simulation one tick. `now` is time since session start.
    /// No-op once the session is over.
    pub fn update(&mut self, now: Duration, rng: &mut impl Rng) {
        if self.status == GameStatus::GameOver {
            return;
        }

        // 1. Spawn on the interval.
        if now.saturating_sub(self.last_spawn) >= self.spawn_interval {
            self.enemies.push(Enemy::spawn(self.field.width, rng));
            self.last_spawn = now;
        }

        // Destroyed entities are collected here during the passes below and
        // removed in one compaction step, so iteration stays safe mid-tick.
        let mut dead_enemies: Vec<usize> = Vec::new();
        let mut spent_bullets: Vec<usize> = Vec::new();

        // 2. Enemy (hull or shot) reaches the player: session over. The
        //    enemy that landed the hit goes down with the ship.
        let mut player_hit = false;
        for (ei, enemy) in self.enemies.iter().enumerate() {
            if enemy.threatens(&self.player.rect) {
                dead_enemies.push(ei);
                player_hit = true;
            }
        }
        if player_hit {
            self.status = GameStatus::GameOver;
            info!("player down, final score {}", self.score.value());
        }

        // 3. Player bullets vs enemies, first hit wins per enemy. Player
        //    death takes precedence: no kills are scored on the tick the
        //    player dies.
        if self.status == GameStatus::Running {
            for (ei, enemy) in self.enemies.iter().enumerate() {
                if dead_enemies.contains(&ei) {
                    continue;
                }
                for (bi, bullet) in self.bullets.iter().enumerate() {
                    if spent_bullets.contains(&bi) {
                        continue;
                    }
                    if enemy.threatens(&bullet.rect) {
                        dead_enemies.push(ei);
                        spent_bullets.push(bi);
                        self.score.increment();
                        debug!("enemy down, score {}", self.score.value());
                        break;
                    }
                }
            }
        }

        // 4. Bounds culling: enemies that left the sides or passed the
        //    bottom, player bullets that left the sides or passed the top.
        for (ei, enemy) in self.enemies.iter().enumerate() {
            let r = &enemy.rect;
            if !dead_enemies.contains(&ei)
                && (r.x < 0.0 || r.x > self.field.width || r.y > self.field.height)
            {
                dead_enemies.push(ei);
            }
        }
        for (bi, bullet) in self.bullets.iter().enumerate() {
            let r = &bullet.rect;
            if !spent_bullets.contains(&bi)
                && (r.x < 0.0 || r.x > self.field.width || r.y < 0.0)
            {
                spent_bullets.push(bi);
            }
        }

        // 5. Compaction, order-preserving.
        if !dead_enemies.is_empty() {
            let mut i = 0;
            self.enemies.retain(|_| {
                let keep = !dead_enemies.contains(&i);
                i += 1;
                keep
            });
        }
        if !spent_bullets.is_empty() {
            let mut i = 0;
            self.bullets.retain(|_| {
                let keep = !spent_bullets.contains(&i);
                i += 1;
                keep
            });
        }

        // 6. Advance the survivors. Skipped after a lethal tick so the final
        //    frame freezes at the collision state.
        if self.status == GameStatus::Running {
            for bullet in &mut self.bullets {
                bullet.advance();
            }
            for enemy in &mut self.enemies {
                enemy.advance(&self.field, rng);
            }
        }
    }
}
