//! Scroll & cull
//!
//! Pipes move left at their own velocity; a pair is dropped once its right
//! edge is strictly left of the screen.

use super::state::PipePair;

/// Advance every pair by `dt` seconds, then drop off-screen pairs.
/// Returns how many pairs were removed.
pub fn scroll_and_cull(pipes: &mut Vec<PipePair>, dt: f32) -> usize {
    if dt > 0.0 {
        for pair in pipes.iter_mut() {
            pair.x += pair.velocity * dt;
        }
    }

    let before = pipes.len();
    pipes.retain(|pair| !pair.is_offscreen());
    before - pipes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{PipeExtent, PipeRole};

    fn pair(id: u32, x: f32) -> PipePair {
        PipePair {
            id,
            x,
            width: 50.0,
            velocity: -200.0,
            scored: false,
            upper: PipeExtent {
                role: PipeRole::Upper,
                top: 0.0,
                height: 200.0,
            },
            lower: PipeExtent {
                role: PipeRole::Lower,
                top: 350.0,
                height: 250.0,
            },
        }
    }

    #[test]
    fn test_moves_left() {
        let mut pipes = vec![pair(1, 400.0)];
        scroll_and_cull(&mut pipes, 0.5);
        assert_eq!(pipes[0].x, 300.0);
    }

    #[test]
    fn test_cull_boundary() {
        let mut pipes = vec![pair(1, -51.0), pair(2, -50.0), pair(3, 10.0)];
        let removed = scroll_and_cull(&mut pipes, 0.0);
        assert_eq!(removed, 1);
        let ids: Vec<u32> = pipes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        // Any further movement pushes the boundary pair out
        scroll_and_cull(&mut pipes, 0.001);
        let ids: Vec<u32> = pipes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let mut pipes = vec![pair(1, 400.0), pair(2, -20.0), pair(3, -50.0)];
        let snapshot = pipes.clone();
        for _ in 0..5 {
            assert_eq!(scroll_and_cull(&mut pipes, 0.0), 0);
        }
        assert_eq!(pipes, snapshot);
    }

    #[test]
    fn test_cull_keeps_scored_flags() {
        let mut pipes = vec![pair(1, -100.0), pair(2, 20.0), pair(3, 300.0)];
        pipes[1].scored = true;
        scroll_and_cull(&mut pipes, 0.0);
        assert_eq!(pipes.len(), 2);
        assert!(pipes[0].scored);
        assert!(!pipes[1].scored);
    }
}
