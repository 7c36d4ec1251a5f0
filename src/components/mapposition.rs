//! World-space position of an entity.
//!
//! The world is y-up: `pos.y` grows upward and marks the entity's feet line,
//! while `pos.x` is its horizontal centre. Collision sensors in
//! [`crate::systems::terrain`] are expressed relative to this pivot.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
