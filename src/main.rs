mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal,
    ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use star_raid::assets::SpriteStore;
use star_raid::world::World;

use display::{TermSurface, CELL_WIDTH};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// The session RNG. `STAR_RAID_SEED` pins it for reproducible runs;
/// otherwise every session rolls fresh.
fn session_rng() -> StdRng {
    match std::env::var("STAR_RAID_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TermSurface::new(&mut *out, cols, rows);
    let (field_width, field_height) = surface.field_size();

    let mut sprites = SpriteStore::new();
    sprites.load("player", "assets/player.txt");
    sprites.load("enemy", "assets/enemy.txt");
    sprites.load("stars", "assets/stars.txt");

    let mut world = World::new(field_width, field_height);
    let mut rng = session_rng();
    let start = Instant::now();
    info!("session started, field {}x{}", field_width, field_height);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. })
                    if kind != KeyEventKind::Release =>
                {
                    match code {
                        KeyCode::Char(' ') => {
                            if world.is_running() {
                                world.fire();
                            }
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent { kind, column, .. }) => {
                    if !world.is_running() {
                        continue;
                    }
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            world.pointer_moved(column as f32 * CELL_WIDTH);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            world.pointer_pressed();
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // One tick: update, then render. Once the session ends, the last
        // frame stays on screen and only quit keys are handled above.
        if world.is_running() {
            world.update(start.elapsed(), &mut rng);
            display::render(&mut surface, &world, &mut sprites)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
