//! Scoring
//!
//! A pair is worth one point the first time its upper pipe's right edge is
//! strictly left of the bird. The lower pipe shares the same x and is never
//! tested, so a pair cannot count twice.

use super::state::{PipePair, PipeRole};

/// Mark newly passed pairs as scored and return how many were passed
pub fn award_passed_pairs(pipes: &mut [PipePair], bird_x: f32) -> u32 {
    let mut awarded = 0;
    for pair in pipes.iter_mut().filter(|p| !p.scored) {
        debug_assert_eq!(pair.upper.role, PipeRole::Upper);
        if pair.right() < bird_x {
            pair.scored = true;
            awarded += 1;
        }
    }
    awarded
}
