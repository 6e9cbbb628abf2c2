//! Pattern playback
//!
//! Expands a pattern into timed actuator steps and drives the actuator
//! through them, one command at a time.

pub mod executor;
pub mod step;

pub use executor::{PlaybackExecutor, PlaybackJob, PlaybackResult};
pub use step::{steps, GapPolicy, Step, Steps};
