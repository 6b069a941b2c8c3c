//! Game settings and physics tuning
//!
//! Persisted as JSON through a [`Storage`] backend.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::storage::{Storage, StorageError};

/// Physics constants a level runs with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Longest integrator substep (seconds)
    pub max_step: f64,
    pub gravity: f64,
    pub jump_speed: f64,
    pub player_x_speed: f64,
    pub wobble_speed: f64,
    pub wobble_dist: f64,
    /// Countdown started when a level is won or lost
    pub finish_delay: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_step: MAX_STEP,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            player_x_speed: PLAYER_X_SPEED,
            wobble_speed: WOBBLE_SPEED,
            wobble_dist: WOBBLE_DIST,
            finish_delay: FINISH_DELAY,
        }
    }
}

impl Tuning {
    /// `max_step` must be finite and at least `MIN_MAX_STEP`, or `animate`
    /// would stall
    pub fn is_valid(&self) -> bool {
        self.max_step.is_finite() && self.max_step >= MIN_MAX_STEP && self.finish_delay.is_finite()
    }
}

/// Session settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics applied to every level
    pub tuning: Tuning,
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Seed for coin wobble phases
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            starting_lives: STARTING_LIVES,
            seed: 0,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lava_run_settings";

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) if settings.tuning.is_valid() && settings.starting_lives > 0 => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Ok(_) => log::warn!("Stored settings out of range, using defaults"),
                Err(err) => log::warn!("Could not parse stored settings: {}", err),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
