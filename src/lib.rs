//! Pixelkin library.
//!
//! Terrain collision, sprite animation timelines and patrol flight behavior
//! for a 2D tile world, built on `bevy_ecs`. The library is exposed for
//! integration tests and for embedding the simulation in a renderer.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
