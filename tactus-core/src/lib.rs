//! Board-agnostic core logic for the haptic firmware
//!
//! This crate contains everything between a received command line and the
//! actuator that does not depend on specific hardware:
//!
//! - Actuator and reporter traits
//! - Protocol configuration
//! - Pattern parsing (`B:` commands) and count conversion (`V:` commands)
//! - Playback executor with explicit gap policies
//! - Byte intake with `ERR:` reporting for rejected input
//! - Per-line session handling (echo, dispatch, status reporting)
//! - Host-side signal gating of detection samples

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod count;
pub mod pattern;
pub mod playback;
pub mod receiver;
pub mod session;
pub mod signal;
pub mod traits;

pub use config::{ConfigError, ProtocolConfig};
pub use count::{count_pattern, parse_count, VibrationCount};
pub use pattern::{parse_pattern, CommandError, ParsedPattern, Pattern, PulseDuration};
pub use playback::{GapPolicy, PlaybackExecutor, PlaybackJob, PlaybackResult, Step};
pub use receiver::{LineReceiver, Received};
pub use session::{Prepared, Session};
pub use traits::{Actuator, Reporter};
