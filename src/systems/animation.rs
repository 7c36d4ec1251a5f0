//! Animation timeline system.
//!
//! Plays the [`AnimationRequest`] of every entity through its [`Animator`]
//! once per frame and writes the result as an [`AnimationFrame`] message.
//! When an animation completes, an [`AnimationFinished`] event is triggered
//! in addition to the configured callback.
//!
//! # Related
//!
//! - [`crate::components::animation::Animator`] – timeline rules
//! - [`crate::resources::spritesheetstore::SpriteSheetStore`] – tag durations

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{AnimationClock, AnimationRequest, Animator};
use crate::components::facing::Facing;
use crate::components::mapposition::MapPosition;
use crate::events::animation::{AnimationFinished, AnimationFrame};
use crate::resources::spritesheetstore::SpriteSheetStore;
use crate::resources::worldtime::WorldTime;

pub fn animation(
    mut query: Query<(
        Entity,
        &mut Animator,
        &AnimationRequest,
        &MapPosition,
        Option<&Facing>,
    )>,
    sheets: Res<SpriteSheetStore>,
    time: Res<WorldTime>,
    mut frames: MessageWriter<AnimationFrame>,
    mut commands: Commands,
) {
    let clock = AnimationClock {
        now_ms: time.elapsed_ms(),
        delta_ms: time.delta_ms(),
    };
    for (entity, mut animator, request, position, facing) in query.iter_mut() {
        let direction = facing.copied().unwrap_or_default().sign();
        let Some(played) = animator.play(&request.tag, direction, &request.config, clock, &sheets)
        else {
            continue;
        };

        if let Some(tag) = played.finished_tag {
            debug!("{:?} finished animation '{}'", entity, tag);
            commands.trigger(AnimationFinished { entity, tag });
        }

        frames.write(AnimationFrame {
            entity,
            tag: played.tag,
            x: position.pos.x,
            y: position.pos.y,
            layer: animator.layer,
            direction: played.direction,
            elapsed_ms: played.elapsed_ms,
        });
    }
}
