//! Patrol flight system.
//!
//! Gathers the inputs of every [`PatrolFlight`] (altitude, dialog state,
//! touched triggers), runs one frame of the behavior and applies its
//! decisions:
//!
//! - a flap sets the vertical velocity and writes a [`JumpCue`] message,
//! - every state transition triggers a [`PatrolStateChanged`] event,
//! - the horizontal intent accelerates the body and turns it around; with no
//!   intent the body brakes toward rest,
//! - the [`AnimationRequest`] follows the new state.
//!
//! Runs before [`movement`](crate::systems::movement::movement) so the
//! velocity it sets is integrated in the same frame.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animation::AnimationRequest;
use crate::components::boxcollider::BoxCollider;
use crate::components::conversation::Conversation;
use crate::components::facing::Facing;
use crate::components::mapposition::MapPosition;
use crate::components::patrol::{PatrolFlight, PatrolInput};
use crate::components::rigidbody::RigidBody;
use crate::events::patrol::{JumpCue, PatrolStateChanged};
use crate::resources::collisionworld::{CollisionWorld, TriggerHits};
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::tileworld::TileWorld;
use crate::resources::worldtime::WorldTime;

#[allow(clippy::type_complexity)]
pub fn patrol_flight_system(
    mut query: Query<(
        Entity,
        &mut PatrolFlight,
        &MapPosition,
        &mut RigidBody,
        Option<&BoxCollider>,
        Option<&Conversation>,
        Option<&mut Facing>,
        Option<&mut AnimationRequest>,
    )>,
    time: Res<WorldTime>,
    config: Res<PhysicsConfig>,
    world: Option<Res<TileWorld>>,
    mut cues: MessageWriter<JumpCue>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut patrol, position, mut rigidbody, collider, conversation, facing, request) in
        query.iter_mut()
    {
        let triggers = match (world.as_deref(), collider) {
            (Some(world), Some(collider)) => {
                let (min, max) = collider.aabb(position.pos);
                world.triggers_at(min, max)
            }
            _ => TriggerHits::new(),
        };

        let output = patrol.update(PatrolInput {
            dt,
            altitude: position.pos.y,
            in_conversation: conversation.is_some_and(|c| c.active),
            triggers: triggers.as_slice(),
            gravity: config.gravity,
        });

        if let Some(vy) = output.jump_velocity {
            rigidbody.set_velocity_y(vy);
            let cue = JumpCue {
                entity,
                x: position.pos.x,
                y: position.pos.y + config.cue_offset,
                particles: config.cue_particles,
            };
            debug!("{:?} flaps at ({}, {})", entity, cue.x, cue.y);
            cues.write(cue);
        }

        for (from, to) in output.transitions {
            info!("{:?} patrol {:?} -> {:?}", entity, from, to);
            commands.trigger(PatrolStateChanged { entity, from, to });
        }

        let acceleration = config.air_acceleration * dt;
        if output.movement != 0 {
            if let Some(mut facing) = facing {
                *facing = Facing(output.movement);
            }
            rigidbody.accelerate_x(acceleration * f32::from(output.movement));
        } else if rigidbody.velocity.x > 0.0 {
            rigidbody.decelerate_x(acceleration);
        } else {
            rigidbody.decelerate_x(-acceleration);
        }

        if let Some(mut request) = request {
            let tag = patrol.animation_tag();
            if request.tag != tag {
                request.set_tag(tag);
            }
        }
    }
}
