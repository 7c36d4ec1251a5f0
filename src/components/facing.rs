use bevy_ecs::prelude::Component;

/// Facing sign of an entity: `1` looks right, `-1` looks left.
///
/// Written by behavior systems whenever the entity has a movement intent and
/// read by the animation system as the draw direction.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing(pub i8);

impl Default for Facing {
    fn default() -> Self {
        Facing(1)
    }
}

impl Facing {
    /// Build a facing from any signed value. Zero keeps looking right.
    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 { Facing(-1) } else { Facing(1) }
    }

    pub fn sign(&self) -> i8 {
        self.0
    }
}
