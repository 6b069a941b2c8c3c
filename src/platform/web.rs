//! Browser bindings
//!
//! JS owns the animation-frame loop and the canvas; it forwards key/touch
//! events and frame times here and reads back JSON snapshots to draw.

use wasm_bindgen::prelude::*;

use super::input::{InputTracker, KeyOutcome};
use super::storage::LocalStorage;
use crate::display::LevelSnapshot;
use crate::game::{GameSession, SessionEvent};
use crate::highscores::{HighScores, now_ms};
use crate::settings::Settings;
use crate::sim::split_plans;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    input: InputTracker,
    storage: Option<LocalStorage>,
    high_scores: HighScores,
}

#[wasm_bindgen]
impl WebGame {
    /// `pack` holds the level plans, separated by empty lines
    #[wasm_bindgen(constructor)]
    pub fn new(pack: &str) -> Result<WebGame, JsValue> {
        let storage = LocalStorage::open()
            .map_err(|err| log::warn!("Storage disabled: {}", err))
            .ok();
        let settings = storage.as_ref().map(|s| Settings::load(s)).unwrap_or_default();
        let high_scores = storage.as_ref().map(|s| HighScores::load(s)).unwrap_or_default();

        let session = GameSession::new(&split_plans(pack), &settings)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        Ok(Self {
            session,
            input: InputTracker::new(),
            storage,
            high_scores,
        })
    }

    /// Returns true when the key belongs to the game (caller should
    /// prevent the browser default)
    pub fn key_event(&mut self, code: u32, down: bool) -> bool {
        match self.input.key_event(code, down) {
            KeyOutcome::Ignored => false,
            KeyOutcome::Movement => true,
            KeyOutcome::Pause => {
                self.session.toggle_pause();
                true
            }
        }
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.input.touch_start(x, y);
    }

    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.input.touch_move(x, y);
    }

    pub fn touch_end(&mut self) {
        self.input.touch_end();
    }

    /// Advance by `delta_ms` and return the event name
    pub fn frame(&mut self, delta_ms: f64) -> String {
        let event = self.session.frame(delta_ms / 1000.0, &self.input.snapshot());

        if let Some((score, levels_cleared)) = event.run_result() {
            if self.high_scores.add_score(score, levels_cleared, now_ms()).is_some() {
                if let Some(storage) = self.storage.as_mut() {
                    if let Err(err) = self.high_scores.save(storage) {
                        log::warn!("Could not save high scores: {}", err);
                    }
                }
            }
        }
        if !matches!(event, SessionEvent::Running | SessionEvent::Paused) {
            self.input.reset();
        }

        event.name().to_string()
    }

    /// Static terrain rows (`x`, `!`, space) of the current level
    pub fn terrain(&self) -> String {
        self.session.level().terrain_rows().join("\n")
    }

    /// Status and actors of the current level as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&LevelSnapshot::capture(self.session.level()))
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn score(&self) -> u64 {
        self.session.score()
    }

    pub fn lives(&self) -> u8 {
        self.session.lives()
    }

    pub fn level_index(&self) -> usize {
        self.session.level_index()
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.high_scores.top_score()
    }
}
