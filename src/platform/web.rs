//! JS-facing session handle (WASM only)
//!
//! The page owns rendering and input; it forwards events here and reads back
//! positions and texts each frame.

use wasm_bindgen::prelude::*;

use super::storage::LocalStorageSlot;
use crate::sim::{FlightController, GameEvent, KinematicPhysics, SessionSignal, Viewport};
use crate::tuning::FlightConfig;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Flappy core loaded");
}

#[wasm_bindgen]
pub struct WebFlight {
    controller: FlightController<KinematicPhysics, LocalStorageSlot>,
    last_signals: Vec<SessionSignal>,
}

#[wasm_bindgen]
impl WebFlight {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebFlight {
        let config = FlightConfig::load(&LocalStorageSlot);
        let physics = KinematicPhysics::new(config.gravity);
        let controller = FlightController::new(
            config,
            Viewport::new(width, height),
            physics,
            LocalStorageSlot,
            super::run_seed(),
        );
        WebFlight {
            controller,
            last_signals: Vec::new(),
        }
    }

    fn handle(&mut self, event: GameEvent) {
        self.last_signals = self.controller.handle(event);
    }

    pub fn pointer_down(&mut self) {
        self.handle(GameEvent::PointerDown);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.handle(GameEvent::Resize { width, height });
    }

    /// Advance one frame; `dt_ms` is the time since the previous frame
    pub fn frame(&mut self, dt_ms: f64) {
        let dt = (dt_ms / 1000.0).min(0.1) as f32;
        self.handle(GameEvent::Frame { dt });
    }

    /// Signals from the last call, as JSON
    pub fn signals_json(&self) -> String {
        serde_json::to_string(&self.last_signals).unwrap_or_default()
    }

    /// Whole session state, as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.controller.state()).unwrap_or_default()
    }

    pub fn bird_y(&self) -> f32 {
        self.controller.state().bird.pos.y
    }

    pub fn bird_rotation(&self) -> f32 {
        self.controller.state().bird.rotation
    }

    pub fn score_text(&self) -> String {
        self.controller.state().score_text()
    }

    pub fn high_score_text(&self) -> String {
        self.controller.state().high_score_text()
    }

    pub fn prompt_text(&self) -> String {
        self.controller.state().prompt_text().to_string()
    }
}
