//! Render contract and a text renderer
//!
//! Renderers only read a [`Level`] between ticks. [`LevelSnapshot`] is the
//! serializable view for renderers living outside the process (JS, tools).

use serde::Serialize;

use crate::Vector;
use crate::sim::{ActorKind, Level, Status};

/// Anything that can present a level frame by frame
pub trait LevelDisplay {
    /// Redraw from the level's current state
    fn draw_frame(&mut self, level: &Level);
    /// Tear down whatever was drawn
    fn clear(&mut self);
}

/// Visible window onto a level, in grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Scroll so the player's centre stays a third of the width away from
    /// every edge, without scrolling past the level.
    pub fn follow(&mut self, level: &Level) {
        let margin = self.width / 3.0;
        let player = level.player();
        let center = player.pos + player.size * 0.5;

        if center.x < self.left + margin {
            self.left = center.x - margin;
        } else if center.x > self.left + self.width - margin {
            self.left = center.x + margin - self.width;
        }
        if center.y < self.top + margin {
            self.top = center.y - margin;
        } else if center.y > self.top + self.height - margin {
            self.top = center.y + margin - self.height;
        }

        let max_left = (level.width() as f64 - self.width).max(0.0);
        let max_top = (level.height() as f64 - self.height).max(0.0);
        self.left = self.left.clamp(0.0, max_left);
        self.top = self.top.clamp(0.0, max_top);
    }
}

/// One actor as a renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub kind: ActorKind,
    pub pos: Vector,
    pub size: Vector,
}

/// Per-frame state for external renderers
#[derive(Debug, Clone, Serialize)]
pub struct LevelSnapshot {
    pub width: usize,
    pub height: usize,
    pub status: Status,
    pub actors: Vec<ActorView>,
}

impl LevelSnapshot {
    pub fn capture(level: &Level) -> Self {
        Self {
            width: level.width(),
            height: level.height(),
            status: level.status(),
            actors: level
                .actors()
                .iter()
                .map(|a| ActorView {
                    kind: a.kind(),
                    pos: a.pos,
                    size: a.size,
                })
                .collect(),
        }
    }
}

/// ASCII renderer, one character per grid cell
#[derive(Debug, Clone)]
pub struct TextDisplay {
    pub viewport: Viewport,
    frame: String,
}

impl TextDisplay {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            viewport: Viewport::new(columns as f64, rows as f64),
            frame: String::new(),
        }
    }

    /// The most recently drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    fn actor_glyph(kind: ActorKind) -> char {
        match kind {
            ActorKind::Player => '@',
            ActorKind::Coin => 'o',
            ActorKind::Lava => '=',
        }
    }
}

impl LevelDisplay for TextDisplay {
    fn draw_frame(&mut self, level: &Level) {
        self.viewport.follow(level);

        let left = self.viewport.left.floor() as usize;
        let top = self.viewport.top.floor() as usize;
        let columns = (self.viewport.width as usize).min(level.width().saturating_sub(left));
        let rows = (self.viewport.height as usize).min(level.height().saturating_sub(top));

        let mut canvas: Vec<Vec<char>> = (top..top + rows)
            .map(|y| {
                (left..left + columns)
                    .map(|x| level.cell(x, y).map_or(' ', |c| c.glyph()))
                    .collect()
            })
            .collect();

        // Player last so it stays on top
        let mut actors: Vec<_> = level.actors().iter().collect();
        actors.sort_by_key(|a| a.kind() == ActorKind::Player);
        for actor in actors {
            let glyph = Self::actor_glyph(actor.kind());
            let x_start = actor.pos.x.floor().max(0.0) as usize;
            let x_end = (actor.pos.x + actor.size.x).ceil().max(0.0) as usize;
            let y_start = actor.pos.y.floor().max(0.0) as usize;
            let y_end = (actor.pos.y + actor.size.y).ceil().max(0.0) as usize;

            for y in y_start.max(top)..y_end.min(top + rows) {
                for x in x_start.max(left)..x_end.min(left + columns) {
                    canvas[y - top][x - left] = glyph;
                }
            }
        }

        self.frame = canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        if level.status().is_terminal() {
            self.frame.push_str("\n-- ");
            self.frame.push_str(level.status().as_str());
            self.frame.push_str(" --");
        }
    }

    fn clear(&mut self) {
        self.frame.clear();
    }
}
