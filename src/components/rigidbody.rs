//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity (in meters per second, the
//! movement system converts to pixels) and named acceleration forces. Each
//! force can be individually enabled/disabled, so gravity can be switched off
//! for an entity without touching the others.
//!
//! Horizontal control goes through [`RigidBody::accelerate_x`] and
//! [`RigidBody::decelerate_x`], which honour the optional horizontal speed
//! limit and never overshoot zero while braking.
//!
//! The `frozen` flag disables all movement calculations, useful when an
//! entity's position is controlled externally.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in meters per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and multiple named acceleration forces.
///
/// # Fields
/// - `velocity` - Current velocity in meters per second (y grows upward)
/// - `forces` - Named acceleration forces that can be individually toggled
/// - `max_speed` - Optional horizontal speed limit applied by [`RigidBody::accelerate_x`]
/// - `frozen` - When true, the movement system skips this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_max_speed(4.0);
/// rb.add_force("gravity", Vec2::new(0.0, -15.0));
/// rb.accelerate_x(10.0 * dt);
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in meters per second.
    pub velocity: Vec2,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Optional horizontal speed limit in meters per second.
    pub max_speed: Option<f32>,
    /// When true, movement system skips all physics calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            forces: FxHashMap::default(),
            max_speed: None,
            frozen: false,
        }
    }

    /// Create a RigidBody whose horizontal speed is clamped to `max_speed`.
    pub fn with_max_speed(max_speed: f32) -> Self {
        Self {
            max_speed: Some(max_speed),
            ..Self::new()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec2::ZERO, |total, force| total + force.value)
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Add `amount` to the horizontal velocity, clamped to `max_speed`.
    pub fn accelerate_x(&mut self, amount: f32) {
        let vx = self.velocity.x + amount;
        self.velocity.x = match self.max_speed {
            Some(max) => vx.clamp(-max, max),
            None => vx,
        };
    }

    /// Brake the horizontal velocity by `amount` without crossing zero.
    ///
    /// `amount` is signed like the velocity it brakes: a positive amount
    /// slows a rightward body, a negative amount slows a leftward one. An
    /// amount whose sign does not match the velocity leaves it unchanged.
    pub fn decelerate_x(&mut self, amount: f32) {
        let vx = self.velocity.x;
        if vx > 0.0 && amount > 0.0 {
            self.velocity.x = (vx - amount).max(0.0);
        } else if vx < 0.0 && amount < 0.0 {
            self.velocity.x = (vx - amount).min(0.0);
        }
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
