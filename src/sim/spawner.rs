//! Repeating spawn timer
//!
//! Stands in for the runtime's `schedule(interval, callback, repeat)` handle.
//! Time is pushed in by the frame loop; each elapsed interval is one fire.

use serde::{Deserialize, Serialize};

/// Repeating timer that fires while active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    interval_ms: u32,
    elapsed_ms: f32,
    active: bool,
}

impl Spawner {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0.0,
            active: false,
        }
    }

    /// Begin firing, counting from zero
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = true;
    }

    /// Cancel. Stopping an inactive spawner is a no-op.
    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Change the cadence; takes effect from the next fire
    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Advance by `dt` seconds and return how many intervals elapsed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.active || dt <= 0.0 {
            return 0;
        }

        self.elapsed_ms += dt * 1000.0;
        let interval = self.interval_ms as f32;
        let mut fires = 0;
        while self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            fires += 1;
        }
        fires
    }
}
