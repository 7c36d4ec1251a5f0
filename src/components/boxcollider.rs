//! Entity body extents used by terrain sensors.
//!
//! Unlike a centred AABB, the collider is anchored at the feet pivot stored in
//! [`MapPosition`](super::mapposition::MapPosition): it spans `width / 2` on
//! both sides of `x` and `height` upward from `y`.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Returns (min, max) of the body rectangle for a given feet position.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let half = self.size.x / 2.0;
        let min = Vec2::new(position.x - half, position.y);
        let max = Vec2::new(position.x + half, position.y + self.size.y);
        (min, max)
    }

    /// Point sampled by the ground pull-out pass.
    pub fn ground_point(&self, position: Vec2) -> Vec2 {
        position
    }

    /// Point sampled by the ceiling pull-out pass.
    pub fn head_point(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x, position.y + self.size.y)
    }

    /// Top of the wall sensor line on the given side (`1` right, `-1` left).
    ///
    /// The sensor starts three quarters up the body and runs `sensor_length()`
    /// pixels downward, covering the middle half of the body.
    pub fn wall_sensor(&self, position: Vec2, side: i8) -> Vec2 {
        let x = position.x + f32::from(side) * self.size.x / 2.0;
        Vec2::new(x, position.y + self.size.y * 3.0 / 4.0)
    }

    pub fn sensor_length(&self) -> f32 {
        self.size.y / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_is_anchored_at_feet() {
        let collider = BoxCollider::new(28.0, 24.0);
        let (min, max) = collider.aabb(Vec2::new(100.0, 50.0));
        assert_eq!(min, Vec2::new(86.0, 50.0));
        assert_eq!(max, Vec2::new(114.0, 74.0));
    }

    #[test]
    fn test_sensor_points() {
        let collider = BoxCollider::new(28.0, 24.0);
        let pos = Vec2::new(100.0, 50.0);
        assert_eq!(collider.ground_point(pos), pos);
        assert_eq!(collider.head_point(pos), Vec2::new(100.0, 74.0));
        assert_eq!(collider.wall_sensor(pos, 1), Vec2::new(114.0, 68.0));
        assert_eq!(collider.wall_sensor(pos, -1), Vec2::new(86.0, 68.0));
        assert_eq!(collider.sensor_length(), 12.0);
    }
}
