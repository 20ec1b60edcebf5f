//! Browser bindings
//!
//! The page owns all DOM work. It forwards press/release, calls `frame` from
//! `requestAnimationFrame` (or `update` with its own frame delta), and renders
//! whatever `drain_events` returns.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::{self, LocalStorageStore};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Flippy Bottle starting...");
}

/// Browser-facing game handle
#[wasm_bindgen]
pub struct FlipGame {
    game: Game<LocalStorageStore>,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl FlipGame {
    /// `new FlipGame(seed)`; without a seed the clock is used
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> FlipGame {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        log::info!("Game initialized with seed: {}", seed);
        Self {
            game: Game::new(seed, LocalStorageStore),
            last_time: None,
        }
    }

    /// "Start" button
    pub fn start_round(&mut self) {
        self.game.start_round();
        self.last_time = None;
    }

    /// "End" button
    pub fn end_round(&mut self) {
        self.game.end_round();
    }

    /// mousedown / touchstart
    pub fn press_start(&mut self) -> bool {
        self.game.press_start()
    }

    /// mouseup / touchend
    pub fn press_end(&mut self) -> bool {
        self.game.press_end()
    }

    /// Advance by a frame delta in milliseconds
    pub fn update(&mut self, elapsed_ms: f32) {
        self.game.update(elapsed_ms);
    }

    /// Animation frame callback with the rAF timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let elapsed = self.last_time.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_time = Some(now_ms);
        self.update(elapsed as f32);
    }

    /// JSON array of events since the last call
    pub fn drain_events(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    pub fn progress_json(&self) -> String {
        persistence::encode(self.game.progress()).unwrap_or_else(|e| {
            log::warn!("{}", e);
            "{}".to_string()
        })
    }

    /// Returns an error message, or `None` on success
    pub fn buy_skin(&mut self, id: &str) -> Option<String> {
        self.game.buy_skin(id).err().map(|e| e.to_string())
    }

    pub fn select_skin(&mut self, id: &str) -> Option<String> {
        self.game.select_skin(id).err().map(|e| e.to_string())
    }

    pub fn select_background(&mut self, id: &str) -> Option<String> {
        self.game.select_background(id).err().map(|e| e.to_string())
    }
}
