//! Physics integration and terrain resolution.
//!
//! For every non-frozen [`RigidBody`] the [`movement`] system:
//!
//! 1. adds the enabled forces to the velocity,
//! 2. computes the tentative position `pos + velocity * pixel_per_meter * dt`,
//! 3. writes it through [`update_position`], which resolves the entity
//!    against the [`TileWorld`] when it carries both a [`BoxCollider`] and a
//!    [`TerrainCollision`].
//!
//! Without a `TileWorld` resource entities move freely.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::terraincollision::TerrainCollision;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::tileworld::TileWorld;
use crate::resources::worldtime::WorldTime;
use crate::systems::terrain::update_position;

pub fn movement(
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &mut RigidBody,
        Option<&BoxCollider>,
        Option<&TerrainCollision>,
    )>,
    time: Res<WorldTime>,
    config: Res<PhysicsConfig>,
    world: Option<Res<TileWorld>>,
) {
    let dt = time.delta;
    for (entity, mut position, mut rigidbody, collider, passes) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }

        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * dt;
        let target = position.pos + rigidbody.velocity * config.pixel_per_meter * dt;

        match (world.as_deref(), collider, passes) {
            (Some(world), Some(collider), Some(passes)) => {
                let outcome = update_position(
                    world,
                    entity,
                    &mut position.pos,
                    &mut rigidbody.velocity,
                    target,
                    collider,
                    passes,
                );
                if !outcome.is_clear() {
                    trace!("{:?} pulled out of terrain: {:?}", entity, outcome);
                }
            }
            _ => position.pos = target,
        }
    }
}
