//! Flappy Core - deterministic flight session logic for a flappy-bird style game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, pipes, scoring)
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key-value slot the game persists into
//! - `tuning`: Named gameplay constants and revision presets
//! - `highscores`: Best score store

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScoreStore;
pub use persistence::{KeyValueSlot, MemorySlot, StorageError};
pub use sim::{FlightController, GameEvent, SessionPhase, SessionSignal, SessionState};
pub use tuning::{ConfigError, FlightConfig, Preset};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz) used by the headless runner
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport (logical pixels)
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_SIZE: f32 = 34.0;
    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 1000.0;
    /// Velocity set on every flap (negative is up)
    pub const FLAP_VELOCITY: f32 = -350.0;

    /// Pipe defaults
    pub const PIPE_VELOCITY: f32 = -200.0;
    pub const PIPE_WIDTH_DIVISOR: f32 = 8.0;
    pub const SPAWN_INTERVAL_MS: u32 = 2000;

    /// Gap geometry as fractions of viewport height
    pub const GAP_RATIO: f32 = 0.2;
    pub const MIN_TOP_RATIO: f32 = 0.1;
    pub const MAX_TOP_RATIO: f32 = 0.75;

    /// Rotation feedback (degrees)
    pub const ROTATION_PER_VELOCITY: f32 = 0.1;
    pub const MIN_ROTATION: f32 = -30.0;
    pub const MAX_ROTATION: f32 = 90.0;
}

/// Clamp a vertical velocity to the bird's display rotation in degrees
#[inline]
pub fn rotation_for_velocity(velocity_y: f32, per_velocity: f32, min: f32, max: f32) -> f32 {
    (velocity_y * per_velocity).clamp(min, max)
}
