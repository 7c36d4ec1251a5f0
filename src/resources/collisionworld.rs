//! Read-only collision queries against world geometry.
//!
//! [`CollisionWorld`] is the seam between the kinematic systems and whatever
//! stores the level geometry. The terrain pull-out passes only ever ask
//! yes/no containment questions, so any geometry (tiles, one-way platforms,
//! liquids, solid props) can sit behind it. Implementations must not mutate
//! anything while answering: many entities query the same world each frame.

use std::sync::Arc;

use bevy_ecs::prelude::Entity;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Category of world geometry, used to include/exclude terrain in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    /// Fully blocking ground and walls.
    Solid,
    /// One-way platform: stands on it from above, passes through from below.
    Platform,
    /// Liquid surface.
    Water,
}

impl TerrainKind {
    /// Map a level layer name to its terrain kind.
    pub fn from_layer_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(TerrainKind::Solid),
            "platform" => Some(TerrainKind::Platform),
            "water" => Some(TerrainKind::Water),
            _ => None,
        }
    }
}

/// Names of trigger volumes touched by an entity. Rarely more than one.
pub type TriggerHits = SmallVec<[Arc<str>; 4]>;

pub trait CollisionWorld {
    /// World height in pixels; the ground pull-out never pushes past it.
    fn height(&self) -> f32;

    /// World width in pixels; bounds the wall pull-out.
    fn width(&self) -> f32;

    /// True when the point is inside geometry that is neither owned by one
    /// of `ignore_entities` nor of a kind listed in `ignore`.
    fn collides_at(&self, x: f32, y: f32, ignore_entities: &[Entity], ignore: &[TerrainKind])
    -> bool;

    /// True when any pixel of the vertical segment starting at `(x, y)` and
    /// running `length` pixels downward collides, with the same exclusions
    /// as [`CollisionWorld::collides_at`].
    fn collides_with_vertical_line(
        &self,
        x: f32,
        y: f32,
        length: f32,
        ignore_entities: &[Entity],
        ignore: &[TerrainKind],
    ) -> bool {
        let steps = length.max(0.0).ceil() as i32;
        (0..steps).any(|i| self.collides_at(x, y - i as f32, ignore_entities, ignore))
    }

    /// Names of all trigger volumes overlapping the rectangle `min..max`.
    fn triggers_at(&self, min: Vec2, max: Vec2) -> TriggerHits;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Everything below `floor` is solid.
    struct Floor {
        floor: f32,
    }

    impl CollisionWorld for Floor {
        fn height(&self) -> f32 {
            100.0
        }
        fn width(&self) -> f32 {
            100.0
        }
        fn collides_at(&self, _x: f32, y: f32, _: &[Entity], ignore: &[TerrainKind]) -> bool {
            !ignore.contains(&TerrainKind::Solid) && y < self.floor
        }
        fn triggers_at(&self, _min: Vec2, _max: Vec2) -> TriggerHits {
            TriggerHits::new()
        }
    }

    #[test]
    fn test_vertical_line_scans_downward() {
        let world = Floor { floor: 10.0 };
        // 15, 14, 13, 12, 11 -> clear
        assert!(!world.collides_with_vertical_line(0.0, 15.0, 5.0, &[], &[]));
        // 15 .. 10 -> 9 is not reached, 10 is not solid
        assert!(!world.collides_with_vertical_line(0.0, 15.0, 6.0, &[], &[]));
        // reaches 9
        assert!(world.collides_with_vertical_line(0.0, 15.0, 7.0, &[], &[]));
        assert!(!world.collides_with_vertical_line(
            0.0,
            15.0,
            7.0,
            &[],
            &[TerrainKind::Solid]
        ));
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(TerrainKind::from_layer_name("water"), Some(TerrainKind::Water));
        assert_eq!(TerrainKind::from_layer_name("lava"), None);
    }
}
