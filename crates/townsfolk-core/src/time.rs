//! Frame timing for the Townsfolk simulation
//!
//! The frame loop is cooperative: one callback per display refresh. The
//! clock accumulates real elapsed time, which drives animation phase and the
//! day/night cycle. Game logic itself advances by a fixed step per frame.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many simulated milliseconds pass per real millisecond
    pub time_scale: f32,
    /// Maximum delta per frame, in milliseconds, to prevent huge jumps
    /// after the window was hidden
    pub max_delta_ms: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_ms: 250.0,
        }
    }
}

/// Elapsed-time tracking for the frame loop
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Configuration
    pub config: TimeConfig,
    /// Time since session start in milliseconds
    pub elapsed_ms: f64,
    /// Delta for this frame in milliseconds (clamped, scaled)
    pub delta_ms: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the simulation is paused
    pub paused: bool,
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock by the raw real-time delta of the previous frame
    pub fn update(&mut self, raw_delta_ms: f32) {
        self.frame_count += 1;

        if self.paused {
            self.delta_ms = 0.0;
            return;
        }

        let clamped = raw_delta_ms.clamp(0.0, self.config.max_delta_ms);
        self.delta_ms = clamped * self.config.time_scale;
        self.elapsed_ms += self.delta_ms as f64;
    }

    /// Elapsed time as f32 milliseconds, the unit animation functions take
    pub fn elapsed_ms_f32(&self) -> f32 {
        self.elapsed_ms as f32
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
