//! Keyboard and touch input tracking
//!
//! Turns raw key/touch events into the [`TickInput`] snapshot the
//! simulation reads each tick.

use crate::sim::TickInput;

/// Browser key codes
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_ESCAPE: u32 = 27;

/// Minimum upward drag (px) that counts as a jump
pub const TOUCH_JUMP_THRESHOLD: f64 = 20.0;
/// Minimum sideways drag (px) that counts as a walk
pub const TOUCH_WALK_THRESHOLD: f64 = 10.0;

/// What a key event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a game key; let the platform handle it
    Ignored,
    /// Movement state updated
    Movement,
    /// Pause toggle requested (key down only)
    Pause,
}

/// Live input state fed by keyboard and touch events
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    pressed: TickInput,
    touch_origin: Option<(f64, f64)>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot for the next tick
    pub fn snapshot(&self) -> TickInput {
        self.pressed
    }

    /// Handle a key down/up event by key code
    pub fn key_event(&mut self, code: u32, down: bool) -> KeyOutcome {
        match code {
            KEY_LEFT => self.pressed.left = down,
            KEY_RIGHT => self.pressed.right = down,
            KEY_UP => self.pressed.up = down,
            KEY_ESCAPE if down => return KeyOutcome::Pause,
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Movement
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.touch_origin = Some((x, y));
    }

    /// Drag gestures relative to where the touch started
    pub fn touch_move(&mut self, x: f64, y: f64) {
        let Some((start_x, start_y)) = self.touch_origin else {
            return;
        };

        // Screen y grows downward
        if y - start_y <= -TOUCH_JUMP_THRESHOLD {
            self.pressed.up = true;
        }

        let dx = x - start_x;
        if dx >= TOUCH_WALK_THRESHOLD {
            self.pressed.left = false;
            self.pressed.right = true;
        } else if dx <= -TOUCH_WALK_THRESHOLD {
            self.pressed.right = false;
            self.pressed.left = true;
        }
    }

    pub fn touch_end(&mut self) {
        self.touch_origin = None;
        self.pressed = TickInput::default();
    }

    /// Drop all held state (level change, focus loss)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
