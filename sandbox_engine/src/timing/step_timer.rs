/// Fixed or variable timestep frame timer
///
/// Time is tracked in integer ticks, 10,000,000 per second. In variable mode
/// every `tick` runs the update callback once with the measured delta. In
/// fixed mode the callback runs zero or more times, each time advancing by
/// exactly the target step.

use std::time::{Duration, Instant};

use crate::config::TimingConfig;

#[derive(Debug, Clone)]
pub struct StepTimer {
    last_time: Instant,
    max_delta: u64,

    elapsed_ticks: u64,
    total_ticks: u64,
    left_over_ticks: u64,

    frame_count: u32,
    frames_per_second: u32,
    frames_this_second: u32,
    second_counter: u64,

    is_fixed_time_step: bool,
    target_elapsed_ticks: u64,
}

impl StepTimer {
    pub const TICKS_PER_SECOND: u64 = 10_000_000;

    /// Variable-step timer targeting 60 updates per second
    pub fn new() -> Self {
        Self {
            last_time: Instant::now(),
            max_delta: Self::TICKS_PER_SECOND / 10,
            elapsed_ticks: 0,
            total_ticks: 0,
            left_over_ticks: 0,
            frame_count: 0,
            frames_per_second: 0,
            frames_this_second: 0,
            second_counter: 0,
            is_fixed_time_step: false,
            target_elapsed_ticks: Self::TICKS_PER_SECOND / 60,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        let mut timer = Self::new();
        timer.set_fixed_time_step(config.fixed_time_step);
        timer.set_target_elapsed_seconds(config.target_elapsed_seconds);
        timer
    }

    pub fn ticks_to_seconds(ticks: u64) -> f64 {
        ticks as f64 / Self::TICKS_PER_SECOND as f64
    }

    pub fn seconds_to_ticks(seconds: f64) -> u64 {
        (seconds * Self::TICKS_PER_SECOND as f64) as u64
    }

    // ===== GETTERS =====

    /// Ticks since the previous update
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn elapsed_seconds(&self) -> f64 {
        Self::ticks_to_seconds(self.elapsed_ticks)
    }

    /// Ticks accumulated by all updates
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn total_seconds(&self) -> f64 {
        Self::ticks_to_seconds(self.total_ticks)
    }

    /// Number of updates since creation
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    pub fn is_fixed_time_step(&self) -> bool {
        self.is_fixed_time_step
    }

    pub fn target_elapsed_ticks(&self) -> u64 {
        self.target_elapsed_ticks
    }

    // ===== SETTERS =====

    pub fn set_fixed_time_step(&mut self, fixed: bool) {
        self.is_fixed_time_step = fixed;
    }

    pub fn set_target_elapsed_ticks(&mut self, ticks: u64) {
        self.target_elapsed_ticks = ticks;
    }

    pub fn set_target_elapsed_seconds(&mut self, seconds: f64) {
        self.target_elapsed_ticks = Self::seconds_to_ticks(seconds);
    }

    /// Forget time spent since the last tick
    ///
    /// Call after an intentional stall (blocking IO, device recreation) so the
    /// fixed-step logic does not run a burst of catch-up updates.
    pub fn reset_elapsed_time(&mut self) {
        self.last_time = Instant::now();
        self.left_over_ticks = 0;
        self.frames_per_second = 0;
        self.frames_this_second = 0;
        self.second_counter = 0;
    }

    // ===== UPDATE =====

    /// Advance by wall-clock time, running `update` as often as the mode requires
    pub fn tick<F: FnMut(&StepTimer)>(&mut self, update: F) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_time);
        self.last_time = now;
        self.advance(delta, update);
    }

    /// Advance by an explicit `delta` instead of the wall clock
    pub fn tick_with_delta<F: FnMut(&StepTimer)>(&mut self, delta: Duration, update: F) {
        self.last_time = Instant::now();
        self.advance(delta, update);
    }

    fn advance<F: FnMut(&StepTimer)>(&mut self, delta: Duration, mut update: F) {
        let raw = u64::try_from(delta.as_nanos() / 100).unwrap_or(u64::MAX);
        self.second_counter = self.second_counter.saturating_add(raw);

        // Clamp long stalls (debugger, suspended window)
        let mut time_delta = raw.min(self.max_delta);
        let last_frame_count = self.frame_count;

        if self.is_fixed_time_step {
            // Within 1/4 ms of the target: snap to it
            if time_delta.abs_diff(self.target_elapsed_ticks) < Self::TICKS_PER_SECOND / 4000 {
                time_delta = self.target_elapsed_ticks;
            }

            self.left_over_ticks += time_delta;

            // A zero target would never drain the accumulator
            if self.target_elapsed_ticks > 0 {
                while self.left_over_ticks >= self.target_elapsed_ticks {
                    self.elapsed_ticks = self.target_elapsed_ticks;
                    self.total_ticks += self.target_elapsed_ticks;
                    self.left_over_ticks -= self.target_elapsed_ticks;
                    self.frame_count = self.frame_count.wrapping_add(1);

                    update(&*self);
                }
            }
        } else {
            self.elapsed_ticks = time_delta;
            self.total_ticks += time_delta;
            self.left_over_ticks = 0;
            self.frame_count = self.frame_count.wrapping_add(1);

            update(&*self);
        }

        if self.frame_count != last_frame_count {
            self.frames_this_second += 1;
        }

        if self.second_counter >= Self::TICKS_PER_SECOND {
            self.frames_per_second = self.frames_this_second;
            self.frames_this_second = 0;
            self.second_counter %= Self::TICKS_PER_SECOND;
        }
    }
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "step_timer_tests.rs"]
mod tests;
