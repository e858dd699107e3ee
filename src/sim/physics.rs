//! Physics capability
//!
//! Gravity integration and overlap tests are injected so the session logic
//! stays runtime-agnostic. `KinematicPhysics` is the built-in implementation.

use super::state::{Aabb, Bird};

/// What the session needs from a physics engine
pub trait Physics {
    /// Integrate the bird over `dt` seconds
    fn step(&mut self, bird: &mut Bird, dt: f32);

    /// Box the bird is kept inside during `step`, `None` to let it leave
    fn set_world_bounds(&mut self, bounds: Option<Aabb>);

    /// True when the two boxes touch
    fn overlaps(&self, a: Aabb, b: Aabb) -> bool;
}

/// Explicit Euler integration with strict AABB overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicPhysics {
    /// Downward acceleration, pixels/s²
    pub gravity: f32,
    /// Bird stops dead at these edges when set
    pub world_bounds: Option<Aabb>,
}

impl KinematicPhysics {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            world_bounds: None,
        }
    }
}

impl Default for KinematicPhysics {
    fn default() -> Self {
        Self::new(crate::consts::GRAVITY)
    }
}

impl Physics for KinematicPhysics {
    fn step(&mut self, bird: &mut Bird, dt: f32) {
        if !bird.gravity_enabled || dt <= 0.0 {
            return;
        }
        bird.velocity_y += self.gravity * dt;
        bird.pos.y += bird.velocity_y * dt;

        if let Some(world) = self.world_bounds {
            let floor = world.max.y - bird.size.y;
            if bird.pos.y < world.min.y {
                bird.pos.y = world.min.y;
                bird.velocity_y = 0.0;
            } else if bird.pos.y > floor {
                bird.pos.y = floor;
                bird.velocity_y = 0.0;
            }
        }
    }

    fn set_world_bounds(&mut self, bounds: Option<Aabb>) {
        self.world_bounds = bounds;
    }

    fn overlaps(&self, a: Aabb, b: Aabb) -> bool {
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::FlightConfig;
    use glam::Vec2;

    fn bird() -> Bird {
        Bird::new(&FlightConfig::default(), Viewport::new(400.0, 600.0))
    }

    #[test]
    fn test_no_gravity_when_disabled() {
        let mut physics = KinematicPhysics::new(1000.0);
        let mut b = bird();
        let y = b.pos.y;
        physics.step(&mut b, 0.5);
        assert_eq!(b.pos.y, y);
        assert_eq!(b.velocity_y, 0.0);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut physics = KinematicPhysics::new(1000.0);
        let mut b = bird();
        b.gravity_enabled = true;
        let y = b.pos.y;
        physics.step(&mut b, 0.5);
        assert_eq!(b.velocity_y, 500.0);
        assert_eq!(b.pos.y, y + 250.0);
    }

    #[test]
    fn test_flap_rises() {
        let mut physics = KinematicPhysics::new(1000.0);
        let mut b = bird();
        b.gravity_enabled = true;
        b.flap(-350.0);
        let y = b.pos.y;
        physics.step(&mut b, 0.125);
        assert!(b.pos.y < y);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let mut physics = KinematicPhysics::new(1000.0);
        physics.set_world_bounds(Some(Aabb::from_min_size(
            Vec2::ZERO,
            Vec2::new(400.0, 600.0),
        )));

        let mut b = bird();
        b.gravity_enabled = true;
        b.flap(-2000.0);
        physics.step(&mut b, 0.5);
        assert_eq!(b.pos.y, 0.0);
        assert_eq!(b.velocity_y, 0.0);

        b.velocity_y = 3000.0;
        physics.step(&mut b, 0.5);
        assert_eq!(b.pos.y, 600.0 - b.size.y);
        assert_eq!(b.velocity_y, 0.0);
    }

    #[test]
    fn test_no_bounds_lets_bird_leave() {
        let mut physics = KinematicPhysics::new(1000.0);
        let mut b = bird();
        b.gravity_enabled = true;
        b.flap(-2000.0);
        physics.step(&mut b, 0.5);
        assert!(b.pos.y < 0.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let physics = KinematicPhysics::default();
        let a = Aabb::from_min_size(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::from_min_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Aabb::from_min_size(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let apart = Aabb::from_min_size(Vec2::new(30.0, 30.0), Vec2::splat(1.0));

        assert!(!physics.overlaps(a, touching));
        assert!(physics.overlaps(a, inside));
        assert!(!physics.overlaps(a, apart));
    }
}
