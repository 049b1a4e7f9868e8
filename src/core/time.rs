//! Simulation clock and frame timing

use std::time::{Duration, Instant};

/// Monotonic time parameter fed to the surface fields.
///
/// The clock only moves forward: negative or non-finite deltas are dropped,
/// and a paused clock ignores deltas entirely. Every vertex of a frame
/// reads the same value, so callers sample [`SimulationClock::seconds`] once
/// per tick and thread it through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationClock {
    elapsed: f64,
    time_scale: f32,
    paused: bool,
}

impl SimulationClock {
    /// Clock starting at t = 0 running at real-time speed
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Clock starting at an arbitrary time
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            elapsed: seconds.max(0.0),
            ..Self::new()
        }
    }

    /// Advance by a frame delta in seconds (scaled by the time scale)
    pub fn advance(&mut self, delta_secs: f32) {
        if self.paused || !delta_secs.is_finite() || delta_secs <= 0.0 {
            return;
        }
        self.elapsed += delta_secs as f64 * self.time_scale as f64;
    }

    /// Current time parameter in seconds
    pub fn seconds(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the playback speed. Negative or non-finite scales clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame rate over every frame a [`FrameTimer`] has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FpsStats {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
    pub frame_count: u64,
}

/// Tracks wall-clock frame timing
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    total: Duration,
    shortest: Duration,
    longest: Duration,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
            total: Duration::ZERO,
            shortest: Duration::MAX,
            longest: Duration::ZERO,
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.record(delta);
    }

    fn record(&mut self, delta: Duration) {
        self.delta = delta;
        self.frame_count += 1;
        self.total += delta;
        self.shortest = self.shortest.min(delta);
        self.longest = self.longest.max(delta);
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average, slowest and fastest frame rate so far
    pub fn fps_stats(&self) -> FpsStats {
        if self.frame_count == 0 {
            return FpsStats::default();
        }
        let rate = |d: Duration| {
            let secs = d.as_secs_f32();
            if secs > 0.0 { 1.0 / secs } else { 0.0 }
        };
        let total = self.total.as_secs_f32();
        FpsStats {
            avg: if total > 0.0 { self.frame_count as f32 / total } else { 0.0 },
            min: rate(self.longest),
            max: rate(self.shortest),
            frame_count: self.frame_count,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
