//! Simulation systems.
//!
//! Submodules overview
//! - [`animation`] – advance animation timelines and submit frames
//! - [`messages`] – rotate the per-frame message queues
//! - [`movement`] – integrate velocity and resolve against terrain
//! - [`patrol`] – drive patrol flyers between their nests
//! - [`terrain`] – ground, ceiling and wall pull-out passes
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod messages;
pub mod movement;
pub mod patrol;
pub mod terrain;
pub mod time;
