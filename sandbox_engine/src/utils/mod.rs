/// Utilities module - small helpers shared across the engine

pub mod strings;

pub use strings::{
    ends_with, left_trim, left_trim_wide, right_trim, right_trim_wide, starts_with, to_utf8, to_wide,
    trim, trim_wide,
};
