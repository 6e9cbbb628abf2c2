//! Status lines sent from the controller back to the host
//!
//! Every response is one line made of a tag and a message:
//! - `RX:` echo of the received line, always first
//! - `ERR:` the command was rejected, nothing was played
//! - `WARN:` a pulse value was skipped or clamped, processing continued
//! - `OK:` playback summary
//!
//! The startup banner is the only untagged line.

use core::fmt::{self, Write};

use heapless::String;

use crate::commands::ProtocolVariant;
use crate::framer::{FramerError, MAX_LINE_LEN};

/// Line ending appended to every encoded response
pub const LINE_ENDING: &str = "\r\n";

/// Maximum encoded response length, including the line ending
pub const MAX_RESPONSE_LEN: usize = MAX_LINE_LEN + 64;

/// Errors that can occur while encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Encoded line does not fit in [`MAX_RESPONSE_LEN`]
    TooLong,
}

/// Reasons a line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// `B:` with nothing after the prefix
    EmptyPayload,
    /// Prefix not recognized by this protocol variant
    UnknownCommand(ProtocolVariant),
    /// `V:` payload not an integer in 1-10
    CountOutOfRange,
    /// More pulses than a pattern can hold
    PatternTooLong,
    /// Line exceeded the framer buffer
    LineTooLong,
    /// Line contained non-ASCII bytes
    NonAscii,
    /// Receive buffer overflowed while the controller was busy
    ReceiveOverrun,
}

impl ErrorKind {
    /// Human readable message for this error
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::EmptyPayload => "Empty payload",
            ErrorKind::UnknownCommand(ProtocolVariant::PatternOnly) => {
                "Expected format 'B:payload'"
            }
            ErrorKind::UnknownCommand(ProtocolVariant::Dual) => "Expected 'V:count' or 'B:pattern'",
            ErrorKind::CountOutOfRange => "Count must be 1-10",
            ErrorKind::PatternTooLong => "Pattern too long",
            ErrorKind::LineTooLong => "Line too long",
            ErrorKind::NonAscii => "Non-ASCII input",
            ErrorKind::ReceiveOverrun => "Receive overrun, input dropped",
        }
    }
}

impl From<FramerError> for ErrorKind {
    fn from(err: FramerError) -> Self {
        match err {
            FramerError::LineTooLong => ErrorKind::LineTooLong,
            FramerError::NonAscii => ErrorKind::NonAscii,
        }
    }
}

/// Non-fatal problems with a single pulse value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Warning<'a> {
    /// Segment was not a positive integer and was skipped
    InvalidPulse(&'a str),
    /// Segment exceeded the maximum and was clamped
    ClampedPulse { segment: &'a str, max_ms: u32 },
}

/// A single status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<'a> {
    /// Startup banner
    Ready(ProtocolVariant),
    /// Echo of a received line
    Received(&'a str),
    /// Command rejected
    Error(ErrorKind),
    /// Pulse value skipped or clamped
    Warning(Warning<'a>),
    /// Playback completed
    Played { pulses: usize },
}

impl<'a> Response<'a> {
    /// Tag at the start of the line, if any
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Response::Ready(_) => None,
            Response::Received(_) => Some("RX"),
            Response::Error(_) => Some("ERR"),
            Response::Warning(_) => Some("WARN"),
            Response::Played { .. } => Some("OK"),
        }
    }

    /// Encode this response as a terminated line
    pub fn encode(&self) -> Result<String<MAX_RESPONSE_LEN>, ResponseError> {
        let mut line = String::new();
        write!(line, "{}{}", self, LINE_ENDING).map_err(|_| ResponseError::TooLong)?;
        Ok(line)
    }
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag() {
            write!(f, "{}: ", tag)?;
        }
        match self {
            Response::Ready(ProtocolVariant::PatternOnly) => f.write_str("Ready for B:payload"),
            Response::Ready(ProtocolVariant::Dual) => {
                f.write_str("Ready for V:count or B:pattern")
            }
            Response::Received(line) => f.write_str(line),
            Response::Error(kind) => f.write_str(kind.message()),
            Response::Warning(Warning::InvalidPulse(segment)) => {
                write!(f, "Invalid pulse value: {}", segment)
            }
            Response::Warning(Warning::ClampedPulse { segment, max_ms }) => {
                write!(f, "Pulse value {} clamped to {}", segment, max_ms)
            }
            Response::Played { pulses } => write!(f, "Played {} pulse(s)", pulses),
        }
    }
}
