//! Command classification
//!
//! A line is classified by its two character, case-sensitive prefix:
//! - `B:` pulse pattern, payload is a comma-separated list of durations
//! - `V:` vibration count, payload is an integer (dual-protocol firmware only)
//!
//! Anything else is an unknown command.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prefix of a pulse pattern command
pub const PATTERN_PREFIX: &str = "B:";

/// Prefix of a vibration count command
pub const COUNT_PREFIX: &str = "V:";

/// Smallest accepted vibration count
pub const MIN_COUNT: u8 = 1;

/// Largest accepted vibration count
pub const MAX_COUNT: u8 = 10;

/// Which command set the firmware accepts
///
/// The host encoder must be configured for the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtocolVariant {
    /// Only `B:` pattern commands
    PatternOnly,
    /// Both `V:` count and `B:` pattern commands
    #[default]
    Dual,
}

impl ProtocolVariant {
    /// Whether `V:` commands are accepted
    pub fn accepts_count(self) -> bool {
        matches!(self, ProtocolVariant::Dual)
    }

    /// Parse a variant name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pattern" | "pattern-only" => Some(ProtocolVariant::PatternOnly),
            "dual" => Some(ProtocolVariant::Dual),
            _ => None,
        }
    }
}

/// A classified command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// `B:` command with the raw payload after the prefix
    Pattern(&'a str),
    /// `V:` command with the raw payload after the prefix
    Count(&'a str),
    /// Unrecognized prefix
    Unknown,
}

impl<'a> Command<'a> {
    /// Classify a trimmed, non-empty line
    pub fn classify(line: &'a str, variant: ProtocolVariant) -> Self {
        if let Some(payload) = line.strip_prefix(PATTERN_PREFIX) {
            return Command::Pattern(payload);
        }
        if variant.accepts_count() {
            if let Some(payload) = line.strip_prefix(COUNT_PREFIX) {
                return Command::Count(payload);
            }
        }
        Command::Unknown
    }

    /// Payload of the command, if it has one
    pub fn payload(&self) -> Option<&'a str> {
        match *self {
            Command::Pattern(p) | Command::Count(p) => Some(p),
            Command::Unknown => None,
        }
    }
}
