//! Message queue maintenance.
//!
//! Messages live for two frames. Rotating the queues at the start of every
//! frame lets readers that run after the schedule still see everything
//! written during it.

use bevy_ecs::prelude::*;

use crate::events::animation::AnimationFrame;
use crate::events::patrol::JumpCue;

pub fn update_frame_messages(
    mut frames: ResMut<Messages<AnimationFrame>>,
    mut cues: ResMut<Messages<JumpCue>>,
) {
    frames.update();
    cues.update();
}
