//! Animation output: render submissions and completion notifications.
//!
//! - [`AnimationFrame`] is written once per frame for every entity whose
//!   [`Animator`](crate::components::animation::Animator) has a bound sprite
//!   sheet. The renderer (outside the engine) reads these messages and draws
//!   the tag at `elapsed_ms`. Nothing flows back.
//! - [`AnimationFinished`] is triggered the frame an animation with a known
//!   duration completes, once per activation.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

/// Draw ordering bucket of a frame submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderLayer {
    Background,
    #[default]
    Entities,
    Foreground,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub entity: Entity,
    pub tag: String,
    pub x: f32,
    pub y: f32,
    pub layer: RenderLayer,
    pub direction: i8,
    /// Animation-local time in milliseconds, already clamped and corrected.
    pub elapsed_ms: f32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationFinished {
    pub entity: Entity,
    /// The tag that completed (not necessarily the one requested this frame).
    pub tag: String,
}
