//! Event and message types produced by the engine.
//!
//! Messages (buffered, read with `MessageReader` or drained) carry data that
//! outside collaborators consume every frame. Events are triggered for
//! observers on discrete state changes.
//!
//! Submodules:
//! - [`animation`] – frame submissions for the renderer and completion events
//! - [`patrol`] – flap cues and patrol state transitions
pub mod animation;
pub mod patrol;
