use bevy_ecs::prelude::Resource;

/// Simulation clock shared by every system.
///
/// `elapsed` and `delta` are in seconds and already include `time_scale`.
/// The animation timeline works in milliseconds; use
/// [`WorldTime::elapsed_ms`] and [`WorldTime::delta_ms`] there.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed * 1000.0
    }

    pub fn delta_ms(&self) -> f32 {
        self.delta * 1000.0
    }
}
