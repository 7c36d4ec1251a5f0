//! Physics and behavior tuning resource.
//!
//! Loaded from an INI file; every key is optional and falls back to the
//! defaults below, so a missing file still gives a playable simulation.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! pixel_per_meter = 18
//! gravity = 15
//! air_acceleration = 10
//!
//! [patrol]
//! wait_time = 5
//! jump_interval = 0.3
//! jump_height = 1.5
//! max_speed = 4
//! cue_offset = 20
//! cue_particles = 20
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::PixelkinError;

const DEFAULT_PIXEL_PER_METER: f32 = 18.0;
const DEFAULT_GRAVITY: f32 = 15.0;
const DEFAULT_AIR_ACCELERATION: f32 = 10.0;
const DEFAULT_WAIT_TIME: f32 = 5.0;
const DEFAULT_JUMP_INTERVAL: f32 = 0.3;
const DEFAULT_JUMP_HEIGHT: f32 = 1.5;
const DEFAULT_MAX_SPEED: f32 = 4.0;
const DEFAULT_CUE_OFFSET: f32 = 20.0;
const DEFAULT_CUE_PARTICLES: u32 = 20;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Global physics constants plus the default tuning of patrol flyers.
///
/// Velocities are in meters per second; `pixel_per_meter` converts them to
/// pixel displacement in the movement system.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub pixel_per_meter: f32,
    /// Downward acceleration in m/s². Positive value, applied as `-gravity` on y.
    pub gravity: f32,
    /// Horizontal acceleration of airborne NPCs in m/s².
    pub air_acceleration: f32,
    /// Seconds a patrol flyer waits at each end.
    pub wait_time: f32,
    /// Cooldown between two flaps, in seconds.
    pub jump_interval: f32,
    /// Height of one flap in meters.
    pub jump_height: f32,
    /// Horizontal speed limit of patrol flyers in m/s.
    pub max_speed: f32,
    /// Vertical offset of the flap particle cue, in pixels.
    pub cue_offset: f32,
    /// Particles requested per flap cue.
    pub cue_particles: u32,
    pub config_path: PathBuf,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsConfig {
    pub fn new() -> Self {
        Self {
            pixel_per_meter: DEFAULT_PIXEL_PER_METER,
            gravity: DEFAULT_GRAVITY,
            air_acceleration: DEFAULT_AIR_ACCELERATION,
            wait_time: DEFAULT_WAIT_TIME,
            jump_interval: DEFAULT_JUMP_INTERVAL,
            jump_height: DEFAULT_JUMP_HEIGHT,
            max_speed: DEFAULT_MAX_SPEED,
            cue_offset: DEFAULT_CUE_OFFSET,
            cue_particles: DEFAULT_CUE_PARTICLES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), PixelkinError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| PixelkinError::Config(format!("Failed to load config file: {}", e)))?;
        self.apply(&config);

        info!(
            "Loaded physics config: {}px/m, gravity={}, air_acceleration={}, wait={}s, jump every {}s",
            self.pixel_per_meter,
            self.gravity,
            self.air_acceleration,
            self.wait_time,
            self.jump_interval
        );
        Ok(())
    }

    /// Parse configuration from INI text. Used by tests and embedders that
    /// keep their settings elsewhere.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), PixelkinError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| PixelkinError::Config(format!("Failed to parse config: {}", e)))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| -> Option<f32> {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };

        // [physics] section
        if let Some(v) = float("physics", "pixel_per_meter") {
            self.pixel_per_meter = v;
        }
        if let Some(v) = float("physics", "gravity") {
            self.gravity = v;
        }
        if let Some(v) = float("physics", "air_acceleration") {
            self.air_acceleration = v;
        }

        // [patrol] section
        if let Some(v) = float("patrol", "wait_time") {
            self.wait_time = v;
        }
        if let Some(v) = float("patrol", "jump_interval") {
            self.jump_interval = v;
        }
        if let Some(v) = float("patrol", "jump_height") {
            self.jump_height = v;
        }
        if let Some(v) = float("patrol", "max_speed") {
            self.max_speed = v;
        }
        if let Some(v) = float("patrol", "cue_offset") {
            self.cue_offset = v;
        }
        if let Some(v) = config.getuint("patrol", "cue_particles").ok().flatten() {
            self.cue_particles = v as u32;
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), PixelkinError> {
        let mut config = Ini::new();

        config.set("physics", "pixel_per_meter", Some(self.pixel_per_meter.to_string()));
        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "air_acceleration", Some(self.air_acceleration.to_string()));

        config.set("patrol", "wait_time", Some(self.wait_time.to_string()));
        config.set("patrol", "jump_interval", Some(self.jump_interval.to_string()));
        config.set("patrol", "jump_height", Some(self.jump_height.to_string()));
        config.set("patrol", "max_speed", Some(self.max_speed.to_string()));
        config.set("patrol", "cue_offset", Some(self.cue_offset.to_string()));
        config.set("patrol", "cue_particles", Some(self.cue_particles.to_string()));

        config
            .write(&self.config_path)
            .map_err(|source| PixelkinError::Io {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved physics config to {:?}", self.config_path);
        Ok(())
    }
}
