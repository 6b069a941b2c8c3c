//! Level model: static grid, actor arena and win/lose status
//!
//! The grid never changes after construction. Actors only ever shrink
//! (collected coins) and the status moves from `Playing` to a terminal
//! state at most once.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::error::LevelError;
use super::plan::Glyph;
use crate::Vector;
use crate::settings::Tuning;

/// Seed used by [`Level::new`]
pub const DEFAULT_SEED: u64 = 0x1a7a;

/// Static terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Lava,
}

impl Cell {
    /// The obstacle this cell presents, if any
    pub fn obstacle(self) -> Option<Obstacle> {
        match self {
            Cell::Empty => None,
            Cell::Wall => Some(Obstacle::Wall),
            Cell::Lava => Some(Obstacle::Lava),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => 'x',
            Cell::Lava => '!',
        }
    }
}

/// Result of an obstacle query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    Lava,
}

/// Something the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Wall,
    Lava,
    Coin { id: u32 },
}

impl From<Obstacle> for Contact {
    fn from(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::Wall => Contact::Wall,
            Obstacle::Lava => Contact::Lava,
        }
    }
}

/// Level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Still in progress
    #[default]
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Playing
    }

    /// Styling class for renderers ("" while playing)
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Playing => "",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }
}

/// A running level
#[derive(Debug, Clone)]
pub struct Level {
    pub(super) width: usize,
    pub(super) height: usize,
    /// Row-major, `width * height` cells
    pub(super) grid: Vec<Cell>,
    pub(super) actors: Vec<Actor>,
    pub(super) player_index: usize,
    pub(super) status: Status,
    /// Set when the status turns terminal, then only decremented
    pub(super) finish_delay: Option<f64>,
    pub(super) tuning: Tuning,
    /// Coins collected during the current substep, removed when it ends
    pub(super) collected: Vec<u32>,
    pub(super) stepping: bool,
}

impl Level {
    /// Parse a plan with default tuning
    pub fn new<S: AsRef<str>>(plan: &[S]) -> Result<Self, LevelError> {
        Self::with_tuning(plan, Tuning::default(), DEFAULT_SEED)
    }

    /// Parse a plan. `seed` drives the coins' initial wobble phases.
    pub fn with_tuning<S: AsRef<str>>(
        plan: &[S],
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, LevelError> {
        if !tuning.is_valid() {
            return Err(LevelError::InvalidTuning);
        }

        let height = plan.len();
        let width = plan.first().map_or(0, |row| row.as_ref().chars().count());
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut grid = Vec::with_capacity(width * height);
        let mut actors = Vec::new();

        for (y, row) in plan.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::MalformedPlan {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                match Glyph::from_char(ch) {
                    Glyph::Terrain(cell) => grid.push(cell),
                    Glyph::Actor(spawn) => {
                        grid.push(Cell::Empty);
                        let id = actors.len() as u32;
                        let cell = Vector::new(x as f64, y as f64);
                        actors.push(Actor::spawn(id, spawn, cell, &mut rng));
                    }
                }
            }
        }

        let players: Vec<usize> = actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActorKind::Player)
            .map(|(i, _)| i)
            .collect();
        let &[player_index] = players.as_slice() else {
            return Err(LevelError::InvalidLevel {
                players: players.len(),
            });
        };

        log::info!(
            "Level {}x{} with {} actors ({} coins)",
            width,
            height,
            actors.len(),
            actors.iter().filter(|a| a.kind() == ActorKind::Coin).count()
        );

        Ok(Self {
            width,
            height,
            grid,
            actors,
            player_index,
            status: Status::Playing,
            finish_delay: None,
            tuning,
            collected: Vec::new(),
            stepping: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Terrain at a grid position; `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.grid[y * self.width + x])
        } else {
            None
        }
    }

    /// Terrain rows as plan-style text (`x`, `!`, space)
    pub fn terrain_rows(&self) -> Vec<String> {
        if self.width == 0 {
            return Vec::new();
        }
        self.grid
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.glyph()).collect())
            .collect()
    }

    /// Live actors in update order
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn player(&self) -> &Actor {
        &self.actors[self.player_index]
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn finish_delay(&self) -> Option<f64> {
        self.finish_delay
    }

    pub fn tuning(&self) -> Tuning {
        self.tuning
    }

    /// Number of coins still to collect
    pub fn coins_left(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| a.kind() == ActorKind::Coin && !self.collected.contains(&a.id))
            .count()
    }

    /// True once the level has ended and its finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() && self.finish_delay.is_some_and(|delay| delay < 0.0)
    }

    /// First obstacle overlapped by the box at `pos` with `size`.
    ///
    /// Leaving the grid sideways or through the top counts as a wall,
    /// leaving through the bottom counts as lava. Inside the grid, cells
    /// are scanned row-major and the first non-empty one wins.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let x_start = pos.x.floor();
        let x_end = (pos.x + size.x).ceil();
        let y_start = pos.y.floor();
        let y_end = (pos.y + size.y).ceil();

        if x_start < 0.0 || x_end > self.width as f64 || y_start < 0.0 {
            return Some(Obstacle::Wall);
        }
        if y_end > self.height as f64 {
            return Some(Obstacle::Lava);
        }

        for y in y_start as usize..y_end as usize {
            for x in x_start as usize..x_end as usize {
                if let Some(obstacle) = self.grid[y * self.width + x].obstacle() {
                    return Some(obstacle);
                }
            }
        }
        None
    }

    /// First other actor, in list order, whose box overlaps `actor`'s
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| {
            other.id != actor.id && !self.collected.contains(&other.id) && actor.overlaps(other)
        })
    }

    /// Apply the consequence of the player touching something
    pub fn player_touched(&mut self, contact: Contact) {
        match contact {
            Contact::Wall => {}
            Contact::Lava => self.finish(Status::Lost),
            Contact::Coin { id } => {
                let is_live_coin = self
                    .actors
                    .iter()
                    .any(|a| a.id == id && a.kind() == ActorKind::Coin);
                if !is_live_coin || self.collected.contains(&id) {
                    return;
                }

                self.collected.push(id);
                log::debug!("Coin {} collected, {} left", id, self.coins_left());
                if self.coins_left() == 0 {
                    self.finish(Status::Won);
                }
                if !self.stepping {
                    self.remove_collected();
                }
            }
        }
    }

    /// Enter a terminal status; ignored once one has been reached
    fn finish(&mut self, status: Status) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        self.finish_delay = Some(self.tuning.finish_delay);
        log::info!("Level {}", status.as_str());
    }

    /// Drop coins collected since the last call
    pub(super) fn remove_collected(&mut self) {
        if self.collected.is_empty() {
            return;
        }
        let collected = std::mem::take(&mut self.collected);
        let removed_before_player = self.actors[..self.player_index]
            .iter()
            .filter(|a| collected.contains(&a.id))
            .count();
        self.player_index -= removed_before_player;
        self.actors.retain(|a| !collected.contains(&a.id));
    }
}
