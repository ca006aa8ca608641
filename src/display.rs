//! Rendering layer — all terminal I/O lives here.
//!
//! The simulation is drawn through the `Surface` trait; `TermSurface`
//! implements it over any writer with queued crossterm commands, mapping
//! field units onto terminal cells. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use star_raid::assets::{Sprite, SpriteStore};
use star_raid::entities::BulletKind;
use star_raid::geometry::Rect;
use star_raid::world::{GameStatus, World};

/// Field units covered by one terminal cell.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BULLET_PLAYER: Color = Color::Red;
const C_BULLET_ENEMY: Color = Color::Blue;
const C_SCORE: Color = Color::White;
const C_OVERLAY: Color = Color::Red;
const C_OVERLAY_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// What the simulation needs from a renderer. Coordinates are field units;
/// the implementation owns the mapping to its own device.
pub trait Surface {
    fn clear(&mut self) -> std::io::Result<()>;
    fn sprite(&mut self, sprite: &Sprite, rect: &Rect) -> std::io::Result<()>;
    fn fill_rect(&mut self, color: Color, rect: &Rect) -> std::io::Result<()>;
    /// Draw `text` horizontally centered on `center_x`.
    fn text(&mut self, text: &str, center_x: f32, y: f32, color: Color) -> std::io::Result<()>;
    fn present(&mut self) -> std::io::Result<()>;
}

// ── Terminal implementation ───────────────────────────────────────────────────

pub struct TermSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TermSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> TermSurface<W> {
        TermSurface { out, cols, rows }
    }

    /// The viewport expressed in field units.
    pub fn field_size(&self) -> (f32, f32) {
        (
            self.cols as f32 * CELL_WIDTH,
            self.rows as f32 * CELL_HEIGHT,
        )
    }

    /// Field position → cell, or `None` when off screen.
    fn cell_at(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / CELL_WIDTH).floor();
        let row = (y / CELL_HEIGHT).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

impl<W: Write> Surface for TermSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn sprite(&mut self, sprite: &Sprite, rect: &Rect) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(sprite.color))?;
        for (i, art) in sprite.rows.iter().enumerate() {
            let y = rect.y + i as f32 * CELL_HEIGHT;
            if let Some((col, row)) = self.cell_at(rect.x, y) {
                // Clip the row at the right edge.
                let visible: String = art.chars().take((self.cols - col) as usize).collect();
                self.out.queue(cursor::MoveTo(col, row))?;
                self.out.queue(Print(visible))?;
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, color: Color, rect: &Rect) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(color))?;
        let col0 = (rect.x / CELL_WIDTH).floor() as i32;
        let col1 = ((rect.x + rect.width) / CELL_WIDTH).floor() as i32;
        let row0 = (rect.y / CELL_HEIGHT).floor() as i32;
        let row1 = ((rect.y + rect.height) / CELL_HEIGHT).floor() as i32;
        for row in row0..=row1 {
            for col in col0..=col1 {
                if (0..self.cols as i32).contains(&col) && (0..self.rows as i32).contains(&row) {
                    self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                    self.out.queue(Print("█"))?;
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str, center_x: f32, y: f32, color: Color) -> std::io::Result<()> {
        let row = (y / CELL_HEIGHT).floor();
        if !(0.0..self.rows as f32).contains(&row) {
            return Ok(());
        }
        let center_col = (center_x / CELL_WIDTH).floor() as u16;
        let col = center_col.saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Frame composition ─────────────────────────────────────────────────────────

fn bullet_color(kind: BulletKind) -> Color {
    match kind {
        BulletKind::Player => C_BULLET_PLAYER,
        BulletKind::Enemy => C_BULLET_ENEMY,
    }
}

/// Render one complete frame. Sprites that are still loading are skipped.
pub fn render(
    surface: &mut impl Surface,
    world: &World,
    sprites: &mut SpriteStore,
) -> std::io::Result<()> {
    surface.clear()?;

    if let Some(stars) = sprites.get("stars") {
        surface.sprite(stars, &world.field)?;
    }

    if let Some(ship) = sprites.get("player") {
        surface.sprite(ship, &world.player.rect)?;
    }

    for enemy in &world.enemies {
        if let Some(art) = sprites.get("enemy") {
            surface.sprite(art, &enemy.rect)?;
        }
        for bullet in &enemy.bullets {
            surface.fill_rect(bullet_color(bullet.kind), &bullet.rect)?;
        }
    }

    for bullet in &world.bullets {
        surface.fill_rect(bullet_color(bullet.kind), &bullet.rect)?;
    }

    surface.text(
        &world.score.value().to_string(),
        world.field.width / 2.0,
        50.0,
        C_SCORE,
    )?;

    if world.status == GameStatus::GameOver {
        draw_game_over(surface, world)?;
    }

    surface.present()
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over(surface: &mut impl Surface, world: &World) -> std::io::Result<()> {
    let cx = world.field.width / 2.0;
    let cy = world.field.height / 2.0;

    surface.text("╔══════════════════╗", cx, cy - CELL_HEIGHT * 2.0, C_OVERLAY)?;
    surface.text("║    GAME  OVER    ║", cx, cy - CELL_HEIGHT, C_OVERLAY)?;
    surface.text("╚══════════════════╝", cx, cy, C_OVERLAY)?;
    surface.text(
        &format!("Final Score: {}", world.score.value()),
        cx,
        cy + CELL_HEIGHT,
        C_OVERLAY_SCORE,
    )?;
    surface.text("Q - Quit", cx, cy + CELL_HEIGHT * 2.0, C_HINT)?;
    Ok(())
}
