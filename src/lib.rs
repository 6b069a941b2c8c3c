//! Lava Run - a tile-based platformer level simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (plan parsing, actors, collisions, status)
//! - `game`: Level sequencing, lives and scoring on top of the simulation
//! - `display`: Render contract and a text renderer
//! - `platform`: Input tracking, storage backends and wasm bindings
//! - `settings`: Data-driven physics tuning

pub mod display;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, Tuning};

/// 2D vector used for every position, size and velocity
pub type Vector = glam::DVec2;

/// Game configuration constants
pub mod consts {
    use crate::Vector;

    /// Longest substep the integrator will simulate at once (seconds)
    pub const MAX_STEP: f64 = 0.05;
    /// Smallest `max_step` a tuning may use
    pub const MIN_MAX_STEP: f64 = 1e-4;
    /// Longest frame the session will feed into a level (seconds)
    pub const MAX_FRAME_STEP: f64 = 0.1;

    /// Downward acceleration applied to the player (units/s²)
    pub const GRAVITY: f64 = 30.0;
    /// Upward speed given by a jump
    pub const JUMP_SPEED: f64 = 17.0;
    /// Horizontal walking speed
    pub const PLAYER_X_SPEED: f64 = 7.0;

    /// Coin bobbing
    pub const WOBBLE_SPEED: f64 = 8.0;
    pub const WOBBLE_DIST: f64 = 0.07;

    /// Time between a level ending and it being reported finished
    pub const FINISH_DELAY: f64 = 1.0;

    /// Lives at the start of a session
    pub const STARTING_LIVES: u8 = 3;

    /// Actor boxes
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    pub const LAVA_SIZE: Vector = Vector::new(1.0, 1.0);

    /// Spawn offsets from the glyph's grid cell
    pub const PLAYER_SPAWN_OFFSET: Vector = Vector::new(0.0, -0.5);
    pub const COIN_SPAWN_OFFSET: Vector = Vector::new(0.2, 0.1);
}
