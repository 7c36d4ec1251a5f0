//! Patrol flight behavior: a perpetual wait/fly cycle between two nests.
//!
//! ```text
//! WaitingLeft -> FlyingRight -> WaitingRight -> FlyingLeft -> WaitingLeft ...
//! ```
//!
//! - Waiting states count `wait_timer` up while nobody is talking to the
//!   entity and advance after `wait_time` seconds.
//! - Flying states push toward their side, flap whenever the entity sinks
//!   below `min_altitude` and the flap cooldown is over, and end as soon as
//!   the entity touches the nest trigger of their side.
//!
//! [`PatrolFlight::update`] holds the whole decision for one frame and is
//! free of ECS access; [`crate::systems::patrol`] feeds it and applies the
//! result to the body.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatrolState {
    WaitingLeft,
    FlyingRight,
    WaitingRight,
    FlyingLeft,
}

impl PatrolState {
    pub fn next(self) -> Self {
        match self {
            PatrolState::WaitingLeft => PatrolState::FlyingRight,
            PatrolState::FlyingRight => PatrolState::WaitingRight,
            PatrolState::WaitingRight => PatrolState::FlyingLeft,
            PatrolState::FlyingLeft => PatrolState::WaitingLeft,
        }
    }

    pub fn is_waiting(self) -> bool {
        matches!(self, PatrolState::WaitingLeft | PatrolState::WaitingRight)
    }

    /// Horizontal intent of the state: `1`, `-1`, or `0` while waiting.
    pub fn direction(self) -> i8 {
        match self {
            PatrolState::FlyingRight => 1,
            PatrolState::FlyingLeft => -1,
            _ => 0,
        }
    }
}

/// Tuning of one patrol flyer.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolSettings {
    pub wait_time: f32,
    pub jump_interval: f32,
    /// Flap height in meters.
    pub jump_height: f32,
    pub nest_left: Arc<str>,
    pub nest_right: Arc<str>,
    pub wait_tag: String,
    pub fly_tag: String,
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            wait_time: 5.0,
            jump_interval: 0.3,
            jump_height: 1.5,
            nest_left: Arc::from("bird_nest_left"),
            nest_right: Arc::from("bird_nest_right"),
            wait_tag: "idle".to_string(),
            fly_tag: "idle".to_string(),
        }
    }
}

/// Per-frame inputs of [`PatrolFlight::update`].
#[derive(Debug, Clone, Copy)]
pub struct PatrolInput<'a> {
    pub dt: f32,
    /// Current feet altitude in pixels.
    pub altitude: f32,
    pub in_conversation: bool,
    /// Names of trigger volumes the entity overlaps.
    pub triggers: &'a [Arc<str>],
    /// Gravity in m/s², used for the flap launch speed.
    pub gravity: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatrolOutput {
    /// Horizontal intent for this frame.
    pub movement: i8,
    /// Vertical launch speed when the entity flapped this frame.
    pub jump_velocity: Option<f32>,
    /// Transitions taken this frame, in order.
    pub transitions: SmallVec<[(PatrolState, PatrolState); 2]>,
}

#[derive(Component, Debug, Clone)]
pub struct PatrolFlight {
    pub state: PatrolState,
    pub wait_timer: f32,
    /// Flap cooldown, counts down to exactly zero.
    pub jump_timer: f32,
    pub min_altitude: f32,
    pub settings: PatrolSettings,
}

impl PatrolFlight {
    pub fn new(min_altitude: f32, settings: PatrolSettings) -> Self {
        Self {
            state: PatrolState::WaitingLeft,
            wait_timer: 0.0,
            jump_timer: 0.0,
            min_altitude,
            settings,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.state.is_waiting()
    }

    pub fn can_jump(&self) -> bool {
        self.jump_timer == 0.0
    }

    /// Dialog may only start while the flyer sits in a nest.
    pub fn is_ready_for_conversation(&self) -> bool {
        self.is_waiting()
    }

    /// Tag the animator should show in the current state.
    pub fn animation_tag(&self) -> &str {
        if self.is_waiting() {
            &self.settings.wait_tag
        } else {
            &self.settings.fly_tag
        }
    }

    fn advance(&mut self, out: &mut PatrolOutput) {
        let from = self.state;
        self.state = from.next();
        out.transitions.push((from, self.state));
    }

    /// Start a flap: restart the cooldown and return the launch speed.
    pub fn jump(&mut self, gravity: f32) -> f32 {
        self.jump_timer = self.settings.jump_interval;
        (2.0 * self.settings.jump_height * gravity).sqrt()
    }

    fn tick_cooldown(&mut self, dt: f32) {
        if self.jump_timer > 0.0 {
            self.jump_timer -= dt;
            if self.jump_timer < 0.0 {
                self.jump_timer = 0.0;
            }
        }
    }

    /// Run one frame of the behavior.
    pub fn update(&mut self, input: PatrolInput<'_>) -> PatrolOutput {
        let mut out = PatrolOutput::default();

        self.tick_cooldown(input.dt);

        if self.is_waiting() && !input.in_conversation {
            self.wait_timer += input.dt;
            if self.wait_timer >= self.settings.wait_time {
                self.wait_timer = 0.0;
                self.advance(&mut out);
            }
        }

        // A flight that starts this frame is already driven this frame.
        if !self.is_waiting() {
            out.movement = self.state.direction();
            if input.altitude < self.min_altitude && self.can_jump() {
                out.jump_velocity = Some(self.jump(input.gravity));
            }

            let nest = match self.state {
                PatrolState::FlyingRight => &self.settings.nest_right,
                _ => &self.settings.nest_left,
            };
            if input.triggers.iter().any(|t| t == nest) {
                self.advance(&mut out);
            }
        }

        out
    }
}
