// Dialog gate for NPC behaviors. The dialog itself lives outside the engine;
// only the "is someone talking to me" bit matters here.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    pub active: bool,
}
