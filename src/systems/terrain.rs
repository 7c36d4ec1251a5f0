//! Terrain collision resolution.
//!
//! After every position write an entity is pushed out of the terrain it
//! penetrates, one pixel at a time, by three independent passes run in a
//! fixed order:
//!
//! 1. **ground** – only while not ascending; steps up while the feet point
//!    collides.
//! 2. **ceiling** – steps down while the head point collides.
//! 3. **wall** – steps against the horizontal velocity while the side sensor
//!    line collides.
//!
//! Ground and ceiling run first so the wall sensors sample the corrected
//! height. The world only answers containment questions, so stepping is the
//! only strategy that works for arbitrary geometry; penetration is at most
//! one frame of movement, which keeps the cost small.
//!
//! Category policy: the ground pass ignores water for its first sample and
//! then steps through every kind (never the entity's own solids), while ceiling and wall passes ignore
//! platforms and water entirely. Platforms are therefore one-way from below
//! and water can be stood on without blocking heads or sides.
//!
//! Every loop is bounded by the world size; an exhausted search stops where
//! it is.

use bevy_ecs::prelude::Entity;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::terraincollision::TerrainCollision;
use crate::resources::collisionworld::{CollisionWorld, TerrainKind};

const GROUND_FIRST_SAMPLE_IGNORES: &[TerrainKind] = &[TerrainKind::Water];
const PASS_THROUGH: &[TerrainKind] = &[TerrainKind::Platform, TerrainKind::Water];

/// Pixels moved by each pass during one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub ground: u32,
    pub ceiling: u32,
    pub wall: u32,
}

impl CollisionOutcome {
    pub fn zero_vertical(&self) -> bool {
        self.ground != 0 || self.ceiling != 0
    }

    pub fn zero_horizontal(&self) -> bool {
        self.wall != 0
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// Push the entity up out of the ground. Skipped while ascending.
pub fn pull_out_of_ground(
    world: &impl CollisionWorld,
    entity: Entity,
    position: &mut Vec2,
    velocity: Vec2,
    collider: &BoxCollider,
) -> u32 {
    let mut pulled = 0;
    if velocity.y <= 0.0 {
        let height = world.height();
        let point = collider.ground_point(*position);
        let mut col = world.collides_at(point.x, point.y, &[entity], GROUND_FIRST_SAMPLE_IGNORES);
        while position.y < height && col {
            pulled += 1;
            position.y += 1.0;
            let point = collider.ground_point(*position);
            col = world.collides_at(point.x, point.y, &[entity], &[]);
        }
    }
    pulled
}

/// Push the entity down out of a ceiling.
pub fn pull_out_of_ceiling(
    world: &impl CollisionWorld,
    entity: Entity,
    position: &mut Vec2,
    collider: &BoxCollider,
) -> u32 {
    let mut pulled = 0;
    while position.y > 0.0 {
        let head = collider.head_point(*position);
        if !world.collides_at(head.x, head.y, &[entity], PASS_THROUGH) {
            break;
        }
        pulled += 1;
        position.y -= 1.0;
    }
    pulled
}

/// Push the entity sideways out of a wall, against its horizontal velocity.
/// A body at rest is treated as moving left.
pub fn pull_out_of_wall(
    world: &impl CollisionWorld,
    entity: Entity,
    position: &mut Vec2,
    velocity: Vec2,
    collider: &BoxCollider,
) -> u32 {
    let side: i8 = if velocity.x > 0.0 { 1 } else { -1 };
    let step = -f32::from(side);
    // Any start inside the world leaves it within width + body width steps.
    let limit = (world.width() + collider.width()).max(0.0).ceil() as u32;
    let mut pulled = 0;
    while pulled < limit {
        let sensor = collider.wall_sensor(*position, side);
        if !world.collides_with_vertical_line(
            sensor.x,
            sensor.y,
            collider.sensor_length(),
            &[entity],
            PASS_THROUGH,
        ) {
            break;
        }
        position.x += step;
        pulled += 1;
    }
    pulled
}

/// Run the enabled passes in order and zero the velocity axes they report.
pub fn resolve_terrain(
    world: &impl CollisionWorld,
    entity: Entity,
    position: &mut Vec2,
    velocity: &mut Vec2,
    collider: &BoxCollider,
    passes: &TerrainCollision,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    if passes.ground {
        outcome.ground = pull_out_of_ground(world, entity, position, *velocity, collider);
    }
    if passes.ceiling {
        outcome.ceiling = pull_out_of_ceiling(world, entity, position, collider);
    }
    if outcome.zero_vertical() {
        velocity.y = 0.0;
    }
    if passes.walls {
        outcome.wall = pull_out_of_wall(world, entity, position, *velocity, collider);
        if outcome.zero_horizontal() {
            velocity.x = 0.0;
        }
    }
    outcome
}

/// Write a new position and resolve it against the terrain.
pub fn update_position(
    world: &impl CollisionWorld,
    entity: Entity,
    position: &mut Vec2,
    velocity: &mut Vec2,
    new_position: Vec2,
    collider: &BoxCollider,
    passes: &TerrainCollision,
) -> CollisionOutcome {
    *position = new_position;
    resolve_terrain(world, entity, position, velocity, collider, passes)
}
