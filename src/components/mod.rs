//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – sprite animation timeline and the per-frame play request
//! - [`boxcollider`] – feet-anchored collision box and its sensor points
//! - [`conversation`] – dialog flag that pauses patrol waiting
//! - [`facing`] – horizontal facing sign used to mirror sprites
//! - [`mapposition`] – world-space position (feet pivot) for an entity
//! - [`patrol`] – patrol flight state machine between two nests
//! - [`rigidbody`] – velocity, named forces and speed limit
//! - [`terraincollision`] – which terrain passes run for an entity

pub mod animation;
pub mod boxcollider;
pub mod conversation;
pub mod facing;
pub mod mapposition;
pub mod patrol;
pub mod rigidbody;
pub mod terraincollision;
