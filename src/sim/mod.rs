//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed maximum substep only
//! - Seeded RNG only
//! - Stable iteration order (plan order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod error;
pub mod level;
pub mod plan;
pub mod tick;

pub use actor::{Actor, ActorBody, ActorKind};
pub use error::LevelError;
pub use level::{Cell, Contact, DEFAULT_SEED, Level, Obstacle, Status};
pub use plan::{Glyph, LavaMotion, SIMPLE_LEVEL_PLAN, Spawn, split_plans};
pub use tick::TickInput;
