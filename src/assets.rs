//! Sprite cache: text-art bitmaps loaded on a dedicated thread and polled
//! by the renderer. A sprite that has not finished loading yields `None`
//! and the caller simply skips drawing it that frame.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crossterm::style::Color;

/// A parsed text-art bitmap: art rows plus the color they are drawn in.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub rows: Vec<String>,
    pub color: Color,
}

impl Sprite {
    /// Sprite file format: the first line names the color, every following
    /// line is one art row.
    fn parse(text: &str) -> Option<Sprite> {
        let mut lines = text.lines();
        let color = color_from_name(lines.next()?.trim())?;
        let rows: Vec<String> = lines.map(str::to_string).collect();
        if rows.is_empty() {
            None
        } else {
            Some(Sprite { rows, color })
        }
    }
}

fn color_from_name(name: &str) -> Option<Color> {
    match name {
        "white" => Some(Color::White),
        "grey" => Some(Color::DarkGrey),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "blue" => Some(Color::Blue),
        "yellow" => Some(Color::Yellow),
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        _ => None,
    }
}

/// Key→sprite cache with asynchronous loads.
///
/// `load` hands the request to a loader thread and returns immediately;
/// `get` drains finished loads and answers `None` while a sprite is still
/// pending. A file that cannot be read or parsed never becomes ready, which
/// the drawing side cannot tell apart from a slow load — both just skip the
/// sprite.
pub struct SpriteStore {
    requests: Sender<(String, PathBuf)>,
    finished: Receiver<(String, Sprite)>,
    sprites: HashMap<String, Sprite>,
}

impl SpriteStore {
    pub fn new() -> SpriteStore {
        let (requests, req_rx) = mpsc::channel::<(String, PathBuf)>();
        let (done_tx, finished) = mpsc::channel();
        thread::spawn(move || {
            for (key, path) in req_rx {
                if let Ok(text) = std::fs::read_to_string(&path) {
                    if let Some(sprite) = Sprite::parse(&text) {
                        if done_tx.send((key, sprite)).is_err() {
                            break; // store dropped, program exiting
                        }
                    }
                }
            }
        });
        SpriteStore {
            requests,
            finished,
            sprites: HashMap::new(),
        }
    }

    /// Request a sprite by key; the load resolves in the background.
    pub fn load(&self, key: &str, path: impl Into<PathBuf>) {
        let _ = self.requests.send((key.to_string(), path.into()));
    }

    /// Fetch a sprite if its load has finished.
    pub fn get(&mut self, key: &str) -> Option<&Sprite> {
        while let Ok((key, sprite)) = self.finished.try_recv() {
            self.sprites.insert(key, sprite);
        }
        self.sprites.get(key)
    }
}

impl Default for SpriteStore {
    fn default() -> Self {
        SpriteStore::new()
    }
}
