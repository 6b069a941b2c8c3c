//! Level sequencing, lives and scoring
//!
//! A [`GameSession`] owns a run through a list of plans. The caller's frame
//! loop feeds it elapsed time and input; it restarts lost levels while lives
//! remain and advances on wins.

use crate::consts::MAX_FRAME_STEP;
use crate::settings::Settings;
use crate::sim::{Level, LevelError, Status, TickInput};

/// What happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Level still in progress (or finishing)
    Running,
    /// Nothing simulated
    Paused,
    /// Level lost, restarted with one life fewer
    LevelLost { level: usize, lives_left: u8 },
    /// Level won, the next one has started
    LevelWon { level: usize, points: u64 },
    /// Out of lives. The session has reset to the first level.
    GameOver { score: u64, levels_cleared: usize },
    /// Last level won. The session has reset to the first level.
    Victory { score: u64, levels_cleared: usize },
}

impl SessionEvent {
    /// Short name for front ends
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Running => "running",
            SessionEvent::Paused => "paused",
            SessionEvent::LevelLost { .. } => "level_lost",
            SessionEvent::LevelWon { .. } => "level_won",
            SessionEvent::GameOver { .. } => "game_over",
            SessionEvent::Victory { .. } => "victory",
        }
    }

    /// Final score and levels cleared when the run just ended
    pub fn run_result(&self) -> Option<(u64, usize)> {
        match *self {
            SessionEvent::GameOver {
                score,
                levels_cleared,
            }
            | SessionEvent::Victory {
                score,
                levels_cleared,
            } => Some((score, levels_cleared)),
            _ => None,
        }
    }
}

/// Points for clearing level `index` after `seconds` on it
pub fn time_score(index: usize, seconds: f64) -> u64 {
    let par = 1000.0 * (index as f64 + 1.0);
    let score = (par - seconds * 10.0).floor() + 100.0;
    score.max(100.0) as u64
}

/// A run through a sequence of levels
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Freshly parsed levels, cloned on every (re)start
    templates: Vec<Level>,
    level: Level,
    level_index: usize,
    level_time: f64,
    starting_lives: u8,
    lives: u8,
    score: u64,
    paused: bool,
}

impl GameSession {
    /// Parse every plan up front; any bad plan fails the whole session
    pub fn new<S: AsRef<str>>(plans: &[Vec<S>], settings: &Settings) -> Result<Self, LevelError> {
        let templates = plans
            .iter()
            .enumerate()
            .map(|(i, plan)| {
                let seed = settings.seed.wrapping_add(i as u64);
                Level::with_tuning(plan, settings.tuning, seed)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some(first) = templates.first().cloned() else {
            return Err(LevelError::NoPlans);
        };
        let starting_lives = settings.starting_lives.max(1);

        log::info!("Session with {} levels, {} lives", templates.len(), starting_lives);
        Ok(Self {
            templates,
            level: first,
            level_index: 0,
            level_time: 0.0,
            starting_lives,
            lives: starting_lives,
            score: 0,
            paused: false,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Zero-based index of the level being played
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.templates.len()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Advance one rendered frame of `elapsed` seconds
    pub fn frame(&mut self, elapsed: f64, input: &TickInput) -> SessionEvent {
        if self.paused {
            return SessionEvent::Paused;
        }

        let elapsed = elapsed.min(MAX_FRAME_STEP);
        self.level.animate(elapsed, input);
        if elapsed.is_finite() && elapsed > 0.0 {
            self.level_time += elapsed;
        }

        if !self.level.is_finished() {
            return SessionEvent::Running;
        }
        match self.level.status() {
            Status::Lost => self.on_lost(),
            Status::Won => self.on_won(),
            Status::Playing => SessionEvent::Running,
        }
    }

    fn on_lost(&mut self) -> SessionEvent {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            log::info!("Level {} lost, {} lives left", self.level_index, self.lives);
            self.start_level(self.level_index);
            return SessionEvent::LevelLost {
                level: self.level_index,
                lives_left: self.lives,
            };
        }

        let score = self.score;
        let levels_cleared = self.level_index;
        log::info!("Game over with score {}", score);
        self.reset();
        SessionEvent::GameOver {
            score,
            levels_cleared,
        }
    }

    fn on_won(&mut self) -> SessionEvent {
        let index = self.level_index;
        let points = time_score(index, self.level_time) * (index as u64 + 1) * self.lives as u64;
        self.score += points;
        log::info!("Level {} won for {} points", index, points);

        if index + 1 < self.templates.len() {
            self.start_level(index + 1);
            return SessionEvent::LevelWon {
                level: index,
                points,
            };
        }

        let score = self.score;
        log::info!("All levels cleared with score {}", score);
        self.reset();
        SessionEvent::Victory {
            score,
            levels_cleared: index + 1,
        }
    }

    fn start_level(&mut self, index: usize) {
        self.level = self.templates[index].clone();
        self.level_index = index;
        self.level_time = 0.0;
    }

    fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.start_level(0);
    }
}
