//! Patrol flight notifications.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::patrol::PatrolState;

/// One-shot visual cue requested when a patrol flyer flaps.
///
/// Particle systems outside the engine turn this into a burst of `particles`
/// particles at `(x, y)`.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct JumpCue {
    pub entity: Entity,
    pub x: f32,
    pub y: f32,
    pub particles: u32,
}

/// Triggered whenever a [`PatrolFlight`](crate::components::patrol::PatrolFlight)
/// moves to its next state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatrolStateChanged {
    pub entity: Entity,
    pub from: PatrolState,
    pub to: PatrolState,
}
