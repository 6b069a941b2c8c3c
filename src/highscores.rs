//! High score leaderboard
//!
//! Persisted as JSON through a [`Storage`] backend, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::platform::storage::{Storage, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Levels completed during the run
    pub levels_cleared: usize,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lava_run_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score earns a place on the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score >= e.score)
    }

    /// Record a run. Returns the 1-indexed rank, or None if it didn't
    /// qualify. A score equal to an existing one ranks above it.
    pub fn add_score(&mut self, score: u64, levels_cleared: usize, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let index = self
            .entries
            .iter()
            .position(|e| score >= e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                levels_cleared,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the board, starting fresh when absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(err) => log::warn!("Discarding unreadable high scores: {}", err),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
