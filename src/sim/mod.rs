//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `GameEvent::Frame`
//! - Seeded RNG only
//! - Pipes kept in spawn order
//! - No rendering or platform dependencies

pub mod geometry;
pub mod physics;
pub mod scoring;
pub mod scroll;
pub mod session;
pub mod spawner;
pub mod state;

pub use geometry::{PipeLayout, build_pair, layout_with_top, random_layout, top_height_range};
pub use physics::{KinematicPhysics, Physics};
pub use scoring::award_passed_pairs;
pub use scroll::scroll_and_cull;
pub use session::{EndReason, FlightController, GameEvent, SessionSignal};
pub use spawner::Spawner;
pub use state::{
    Aabb, Bird, PipeExtent, PipePair, PipeRole, RngState, SessionPhase, SessionRng, SessionState,
    Viewport,
};
