//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, touch)
//! - Storage (LocalStorage on web, files natively)
//! - wasm bindings for a browser front end

pub mod input;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputTracker, KeyOutcome};
pub use storage::{MemoryStorage, Storage, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
