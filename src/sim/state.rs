//! Session state and core simulation types
//!
//! Everything a flight session mutates lives in `SessionState`, owned by one
//! controller. No globals.

use glam::Vec2;
use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::tuning::FlightConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Bird parked, waiting for the first tap
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended (settles to NotStarted within the same event)
    Ended,
}

/// Axis-aligned box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Current drawable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::consts::VIEWPORT_WIDTH, crate::consts::VIEWPORT_HEIGHT)
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left of the bird's box; `pos.x` is its horizontal position
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub velocity_y: f32,
    /// Display tilt in degrees
    pub rotation: f32,
    /// Gravity only applies while a session runs
    pub gravity_enabled: bool,
}

impl Bird {
    pub fn new(config: &FlightConfig, viewport: Viewport) -> Self {
        let mut bird = Self {
            pos: Vec2::new(config.bird_x, 0.0),
            size: Vec2::splat(config.bird_size),
            velocity_y: 0.0,
            rotation: 0.0,
            gravity_enabled: false,
        };
        bird.recenter(viewport);
        bird
    }

    /// Park the bird mid-screen with no motion
    pub fn recenter(&mut self, viewport: Viewport) {
        self.pos.y = (viewport.height - self.size.y) / 2.0;
        self.velocity_y = 0.0;
        self.rotation = 0.0;
    }

    /// Apply the flap impulse
    pub fn flap(&mut self, velocity: f32) {
        self.velocity_y = velocity;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_min_size(self.pos, self.size)
    }

    /// True when the bird is above the top edge or touching the floor
    pub fn out_of_bounds(&self, viewport: Viewport) -> bool {
        self.pos.y < 0.0 || self.pos.y >= viewport.height - self.size.y
    }
}

/// Which member of a pair an extent is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeRole {
    /// Hangs from the top edge
    Upper,
    /// Stands on the bottom edge
    Lower,
}

/// One drawn pipe (vertical span only; horizontal span is the pair's)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeExtent {
    pub role: PipeRole,
    /// Y of the top edge
    pub top: f32,
    pub height: f32,
}

impl PipeExtent {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// An upper and a lower pipe sharing one horizontal position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Horizontal velocity (negative scrolls left)
    pub velocity: f32,
    /// Set once the bird has passed this pair
    pub scored: bool,
    pub upper: PipeExtent,
    pub lower: PipeExtent,
}

impl PipePair {
    /// Right edge of both extents
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.upper.bottom()
    }

    pub fn gap_bottom(&self) -> f32 {
        self.lower.top
    }

    pub fn extents(&self) -> [PipeExtent; 2] {
        [self.upper, self.lower]
    }

    pub fn extent_bounds(&self, extent: &PipeExtent) -> Aabb {
        Aabb::from_min_size(
            Vec2::new(self.x, extent.top),
            Vec2::new(self.width, extent.height),
        )
    }

    /// True once the pair has fully left the screen
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// 32-bit outputs drawn since seeding
    #[serde(default)]
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Generator positioned after `draws` outputs
    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }
}

/// Seeded generator that tracks its stream position so it survives a
/// save/restore
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RngState", into = "RngState")]
pub struct SessionRng {
    state: RngState,
    rng: Pcg32,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        RngState::new(seed).into()
    }

    pub fn state(&self) -> RngState {
        self.state
    }
}

impl From<RngState> for SessionRng {
    fn from(state: RngState) -> Self {
        Self {
            rng: state.to_rng(),
            state,
        }
    }
}

impl From<SessionRng> for RngState {
    fn from(rng: SessionRng) -> Self {
        rng.state
    }
}

// Every output goes through next_u32 so `draws` counts generator steps
impl RngCore for SessionRng {
    fn next_u32(&mut self) -> u32 {
        self.state.draws += 1;
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Seeded spawn RNG (persisted as seed + stream position)
    pub rng: SessionRng,
    pub phase: SessionPhase,
    pub score: u64,
    /// Best score so far (mirrors the store)
    pub high_score: u64,
    pub bird: Bird,
    /// Active pipe pairs, oldest first
    pub pipes: Vec<PipePair>,
    pub viewport: Viewport,
    pub spawner: Spawner,
    /// "Tap to start" prompt visibility
    pub prompt_visible: bool,
    /// Sessions completed since startup
    pub sessions_played: u32,
    next_id: u32,
}

impl SessionState {
    /// Create a parked session with the given seed
    pub fn new(seed: u64, config: &FlightConfig, viewport: Viewport, high_score: u64) -> Self {
        Self {
            rng: SessionRng::new(seed),
            phase: SessionPhase::NotStarted,
            score: 0,
            high_score,
            bird: Bird::new(config, viewport),
            pipes: Vec::new(),
            viewport,
            spawner: Spawner::new(config.spawn_interval_ms),
            prompt_visible: true,
            sessions_played: 0,
            next_id: 1,
        }
    }

    /// Allocate a new pipe pair ID
    pub fn next_pair_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Text for the score display
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    /// Text for the start prompt, empty while hidden
    pub fn prompt_text(&self) -> &'static str {
        if self.prompt_visible {
            "Tap to start"
        } else {
            ""
        }
    }
}
