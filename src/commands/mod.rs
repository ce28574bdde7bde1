//! Command implementations for motivad CLI

mod clean;
mod misc;
mod remind;

pub use clean::*;
pub use misc::*;
pub use remind::*;
