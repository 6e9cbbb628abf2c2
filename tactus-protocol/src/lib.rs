//! Tactus Haptic Command Protocol
//!
//! This crate defines the line-oriented serial protocol between a host
//! (the detection pipeline) and the actuator controller. The protocol is
//! plain ASCII so it can be driven from any serial terminal.
//!
//! # Protocol Overview
//!
//! Every command is a single `\n`-terminated line with a two character
//! prefix:
//! ```text
//! B:200,150,400      pulse pattern, durations in milliseconds
//! V:3                vibration count, 1-10 fixed-cadence pulses
//! ```
//!
//! The controller answers each line with one or more status lines:
//! ```text
//! RX: B:200,-5,400
//! WARN: Invalid pulse value: -5
//! OK: Played 2 pulse(s)
//! ```
//!
//! The controller is a "dumb actuator": it keeps no state between lines.
//! Deciding when to vibrate, and how often, is the host's job.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod emotion;
pub mod framer;
pub mod host;
pub mod responses;

pub use commands::{Command, ProtocolVariant, MAX_COUNT, MIN_COUNT};
pub use emotion::Emotion;
pub use framer::{FramerError, Line, LineFramer, MAX_LINE_LEN};
pub use host::{encode_count, encode_pattern, EncodeError, HostEncoder};
pub use responses::{ErrorKind, Response, ResponseError, Warning, MAX_RESPONSE_LEN};
