/// Input module - pointer state shared between the host and the render thread

pub mod input_tracker;

pub use input_tracker::InputTracker;
