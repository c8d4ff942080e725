//! Time management for the game loop.
//!
//! The clock is advanced explicitly by the driver so the same frame sequence
//! always produces the same variable and fixed ticks.

use std::time::Duration;

/// Default fixed timestep rate for physics and orientation integration.
pub const DEFAULT_FIXED_RATE_HZ: f64 = 50.0;

/// Upper bound on fixed steps consumed per frame, so a long stall cannot
/// snowball into an ever-growing backlog.
const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

/// Manages frame timing and the fixed-step accumulator.
#[derive(Debug)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for physics.
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
    /// Fixed steps consumed during the current frame.
    steps_this_frame: u32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager running fixed updates at the default rate.
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / DEFAULT_FIXED_RATE_HZ),
            accumulator: Duration::ZERO,
            steps_this_frame: 0,
        }
    }

    /// Create a time manager with a specific fixed rate in Hz.
    pub fn with_fixed_rate(hz: f64) -> Self {
        let mut time = Self::new();
        time.set_fixed_rate(hz);
        time
    }

    /// Begin a new frame that lasted `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
        self.steps_this_frame = 0;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator < self.fixed_timestep {
            return false;
        }
        if self.steps_this_frame >= MAX_FIXED_STEPS_PER_FRAME {
            log::warn!(
                "Dropping {:.3}s of fixed-step backlog",
                self.accumulator.as_secs_f32()
            );
            self.accumulator = Duration::ZERO;
            return false;
        }
        self.accumulator -= self.fixed_timestep;
        self.steps_this_frame += 1;
        true
    }

    /// Set the fixed timestep rate in Hz. Non-positive rates are ignored.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        if hz <= 0.0 || !hz.is_finite() {
            log::warn!("Ignoring invalid fixed rate {hz} Hz");
            return;
        }
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }
}
