//! Pipe pair geometry
//!
//! Picks a random gap for a new pair from the current viewport:
//! ```text
//! gap      = H * gap_ratio
//! min_top  = H * min_top_ratio
//! max_top  = max(H * max_top_ratio - gap, min_top)
//! top      = random integer in [min_top, max_top]
//! bottom   = H - top - gap
//! ```

use rand::Rng;

use super::state::{PipeExtent, PipePair, PipeRole, Viewport};
use crate::tuning::FlightConfig;

/// Vertical split of one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeLayout {
    pub top_height: f32,
    pub gap_height: f32,
    pub bottom_height: f32,
    pub width: f32,
}

/// Allowed range for the upper pipe's height, always non-empty
pub fn top_height_range(viewport: Viewport, config: &FlightConfig) -> (f32, f32) {
    let gap = viewport.height * config.gap_ratio;
    let min_top = viewport.height * config.min_top_ratio;
    let max_top = (viewport.height * config.max_top_ratio - gap).max(min_top);
    (min_top, max_top)
}

/// Layout for a known upper pipe height
pub fn layout_with_top(viewport: Viewport, config: &FlightConfig, top_height: f32) -> PipeLayout {
    let gap_height = viewport.height * config.gap_ratio;
    PipeLayout {
        top_height,
        gap_height,
        bottom_height: viewport.height - top_height - gap_height,
        width: viewport.width / config.pipe_width_divisor,
    }
}

/// Random layout with an integer upper height
pub fn random_layout(viewport: Viewport, config: &FlightConfig, rng: &mut impl Rng) -> PipeLayout {
    let (min_top, max_top) = top_height_range(viewport, config);

    // Integer bounds inside [min_top, max_top]; degenerate ranges collapse to min_top
    let lo = min_top.ceil() as i64;
    let hi = max_top.floor() as i64;
    let top = if hi > lo {
        rng.random_range(lo..=hi) as f32
    } else if hi == lo {
        lo as f32
    } else {
        min_top
    };

    layout_with_top(viewport, config, top)
}

/// Build a pair at the right edge of the viewport
pub fn build_pair(id: u32, viewport: Viewport, config: &FlightConfig, layout: PipeLayout) -> PipePair {
    PipePair {
        id,
        x: viewport.width,
        width: layout.width,
        velocity: config.pipe_velocity,
        scored: false,
        upper: PipeExtent {
            role: PipeRole::Upper,
            top: 0.0,
            height: layout.top_height,
        },
        lower: PipeExtent {
            role: PipeRole::Lower,
            top: viewport.height - layout.bottom_height,
            height: layout.bottom_height,
        },
    }
}
