use bevy_ecs::prelude::Resource;

/// Simulation time: per-frame delta and total elapsed seconds.
///
/// `f64` so that millisecond-level animation arithmetic stays exact over
/// long uptimes. `frame_count` supports work scheduled every N frames, like
/// texture cache cleanup.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Total elapsed seconds, monotonically increasing.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
    pub time_scale: f64,
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
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }
}
