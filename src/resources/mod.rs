//! ECS resources made available to systems.
//!
//! Overview
//! - `collisionworld` – terrain query interface used by the collision passes
//! - `level` – JSON level file: layers, triggers, sprite sheets, spawns
//! - `physicsconfig` – global physics constants and patrol tuning (INI)
//! - `spritesheetstore` – tag durations of every loaded sprite sheet
//! - `tileworld` – tile grid with trigger volumes, the concrete collision world
//! - `worldtime` – simulation time and delta
pub mod collisionworld;
pub mod level;
pub mod physicsconfig;
pub mod spritesheetstore;
pub mod tileworld;
pub mod worldtime;
