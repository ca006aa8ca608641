use star_raid::entities::*;
use star_raid::geometry::{Rect, Vec2};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn field() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
        velocity: ENEMY_FALL_VELOCITY,
        bullets: Vec::new(),
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_spawns_centered_on_source() {
    let source = Rect::new(100.0, 100.0, 50.0, 50.0);
    let b = Bullet::from_source(&source, ENEMY_BULLET_VELOCITY, BulletKind::Enemy);
    assert_eq!(b.rect, Rect::new(125.0, 125.0, BULLET_WIDTH, BULLET_HEIGHT));
}

#[test]
fn bullet_advance_applies_velocity_once() {
    // Zero-sized source, so no centering offset obscures the kinematics
    let source = Rect::new(100.0, 200.0, 0.0, 0.0);
    let mut b = Bullet::from_source(&source, PLAYER_BULLET_VELOCITY, BulletKind::Player);
    b.advance();
    assert_eq!(b.rect.x, 100.0);
    assert_eq!(b.rect.y, 180.0);
    b.advance();
    assert_eq!(b.rect.y, 160.0);
}

#[test]
fn bullet_overlap_delegates_to_rect() {
    let source = Rect::new(100.0, 100.0, 0.0, 0.0);
    let b = Bullet::from_source(&source, PLAYER_BULLET_VELOCITY, BulletKind::Player);
    assert!(b.overlaps(&Rect::new(90.0, 95.0, 20.0, 20.0)));
    assert!(!b.overlaps(&Rect::new(300.0, 300.0, 20.0, 20.0)));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_spawns_at_bottom_left() {
    let p = Player::new(&field());
    assert_eq!(p.rect, Rect::new(0.0, 500.0, PLAYER_WIDTH, PLAYER_HEIGHT));
}

#[test]
fn player_slide_is_purely_horizontal() {
    let mut p = Player::new(&field());
    p.slide(12.5);
    assert_eq!(p.rect.x, 12.5);
    assert_eq!(p.rect.y, 500.0);
    p.slide(-20.0);
    assert_eq!(p.rect.x, -7.5);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_above_top_edge_within_field() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let e = Enemy::spawn(800.0, &mut rng);
        assert_eq!(e.rect.y, ENEMY_SPAWN_Y);
        assert!((0.0..800.0).contains(&e.rect.x));
        assert_eq!(e.rect.width, ENEMY_SIZE);
        assert_eq!(e.rect.height, ENEMY_SIZE);
        assert!(e.bullets.is_empty());
    }
}

#[test]
fn enemy_advance_translates_by_velocity() {
    let mut e = enemy_at(100.0, 100.0);
    e.advance(&field(), &mut seeded_rng());
    assert_eq!(e.rect.x, 100.0);
    assert_eq!(e.rect.y, 105.0);
}

#[test]
fn enemy_fire_count_within_binomial_bounds() {
    // Huge field so no shot is ever culled; 2000 frames at 3% each.
    // Mean 60, σ ≈ 7.6 — the bounds below are far beyond 5σ.
    let huge = Rect::new(0.0, 0.0, 1_000_000.0, 1_000_000_000.0);
    let mut rng = seeded_rng();
    let mut e = Enemy::spawn(huge.width, &mut rng);
    for _ in 0..2000 {
        e.advance(&huge, &mut rng);
    }
    let fired = e.bullets.len();
    assert!(
        (20..=120).contains(&fired),
        "expected ~60 shots over 2000 frames, got {fired}"
    );
}

#[test]
fn enemy_culls_own_bullets_past_bottom() {
    let mut e = enemy_at(100.0, 100.0);
    // One shot about to leave, one safely inside
    e.bullets.push(Bullet {
        rect: Rect::new(100.0, 595.0, BULLET_WIDTH, BULLET_HEIGHT),
        velocity: ENEMY_BULLET_VELOCITY,
        kind: BulletKind::Enemy,
    });
    e.bullets.push(Bullet {
        rect: Rect::new(100.0, 300.0, BULLET_WIDTH, BULLET_HEIGHT),
        velocity: ENEMY_BULLET_VELOCITY,
        kind: BulletKind::Enemy,
    });
    e.advance(&field(), &mut seeded_rng());
    // 595 → 605 is past the bottom edge; 300 → 310 stays
    assert!(e.bullets.iter().all(|b| b.rect.y <= 600.0));
    assert!(e.bullets.iter().any(|b| b.rect.y == 310.0));
}

#[test]
fn enemy_culls_own_bullets_past_sides() {
    let mut e = enemy_at(100.0, 100.0);
    e.bullets.push(Bullet {
        rect: Rect::new(-5.0, 300.0, BULLET_WIDTH, BULLET_HEIGHT),
        velocity: Vec2::new(0.0, 10.0),
        kind: BulletKind::Enemy,
    });
    e.advance(&field(), &mut seeded_rng());
    assert!(e.bullets.iter().all(|b| b.rect.x >= 0.0));
}

#[test]
fn enemy_threat_via_hull() {
    let e = enemy_at(100.0, 100.0);
    assert!(e.threatens(&Rect::new(120.0, 120.0, 90.0, 100.0)));
    assert!(!e.threatens(&Rect::new(400.0, 400.0, 90.0, 100.0)));
}

#[test]
fn enemy_threat_includes_own_bullets() {
    // Hull far away, but one of its shots sits on the target
    let mut e = enemy_at(700.0, 10.0);
    e.bullets.push(Bullet {
        rect: Rect::new(40.0, 520.0, BULLET_WIDTH, BULLET_HEIGHT),
        velocity: ENEMY_BULLET_VELOCITY,
        kind: BulletKind::Enemy,
    });
    let target = Rect::new(0.0, 500.0, 90.0, 100.0);
    assert!(e.threatens(&target));
}

#[test]
fn bullet_kinds_are_distinct() {
    assert_eq!(BulletKind::Player, BulletKind::Player);
    assert_ne!(BulletKind::Player, BulletKind::Enemy);
}
