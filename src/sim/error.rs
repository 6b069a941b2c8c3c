//! Level construction errors

use thiserror::Error;

/// Reasons a plan cannot become a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Rows of differing length
    #[error("plan row {row} has {found} cells, expected {expected}")]
    MalformedPlan {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Zero or several `@` glyphs
    #[error("plan must contain exactly one player, found {players}")]
    InvalidLevel { players: usize },

    /// Tuning that would stall or break the integrator
    #[error("tuning max_step must be finite and at least 1e-4")]
    InvalidTuning,

    /// A session needs at least one plan
    #[error("no plans to play")]
    NoPlans,
}
