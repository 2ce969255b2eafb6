/// Timing module - frame timing for animation and simulation

pub mod step_timer;

pub use step_timer::StepTimer;
