/// Thread-safe pointer tracking state
///
/// The host thread reports pointer events, the render thread reads the
/// position before each update. Both coordinates are packed in one atomic so a
/// reader never observes x and y from different events.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct InputTracker {
    position: AtomicU64,
    tracking: AtomicBool,
}

fn pack(x: f32, y: f32) -> u64 {
    ((x.to_bits() as u64) << 32) | y.to_bits() as u64
}

fn unpack(bits: u64) -> (f32, f32) {
    (f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking at (`x`, `y`)
    pub fn pointer_pressed(&self, x: f32, y: f32) {
        self.set_position(x, y);
        self.tracking.store(true, Ordering::Release);
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.set_position(x, y);
    }

    /// Stop tracking at (`x`, `y`)
    pub fn pointer_released(&self, x: f32, y: f32) {
        self.set_position(x, y);
        self.tracking.store(false, Ordering::Release);
    }

    /// Last reported position as (x, y)
    pub fn position(&self) -> (f32, f32) {
        unpack(self.position.load(Ordering::Acquire))
    }

    pub fn position_x(&self) -> f32 {
        self.position().0
    }

    pub fn position_y(&self) -> f32 {
        self.position().1
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    fn set_position(&self, x: f32, y: f32) {
        self.position.store(pack(x, y), Ordering::Release);
    }
}

#[cfg(test)]
#[path = "input_tracker_tests.rs"]
mod tests;
