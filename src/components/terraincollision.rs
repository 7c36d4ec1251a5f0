//! Per-entity selection of terrain pull-out passes.
//!
//! Entities opt into terrain resolution by carrying a [`TerrainCollision`]
//! next to a [`BoxCollider`](super::boxcollider::BoxCollider). The movement
//! system then runs the enabled passes after every position write, always in
//! the order ground, ceiling, wall.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainCollision {
    pub ground: bool,
    pub ceiling: bool,
    pub walls: bool,
}

impl Default for TerrainCollision {
    fn default() -> Self {
        Self::all()
    }
}

impl TerrainCollision {
    pub fn all() -> Self {
        Self {
            ground: true,
            ceiling: true,
            walls: true,
        }
    }

    pub fn none() -> Self {
        Self {
            ground: false,
            ceiling: false,
            walls: false,
        }
    }
}
