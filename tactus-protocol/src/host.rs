//! Host-side command encoding
//!
//! The detection pipeline produces a vibration count in 0-10 per event.
//! [`HostEncoder`] turns it into the command line the firmware expects:
//! a `V:` line for dual-protocol firmware, or the equivalent `B:` pattern
//! for pattern-only firmware.

use core::fmt::Write;

use heapless::String;

use crate::commands::{ProtocolVariant, COUNT_PREFIX, MAX_COUNT, MIN_COUNT, PATTERN_PREFIX};
use crate::framer::{LINE_TERMINATOR, MAX_LINE_LEN};

/// An encoded command line, including its terminator
pub type CommandLine = String<{ MAX_LINE_LEN + 1 }>;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Count outside 1-10
    CountOutOfRange,
    /// Pattern with no pulses
    EmptyPattern,
    /// Encoded line exceeds the firmware's line limit
    LineTooLong,
}

/// Encode a `V:` command
pub fn encode_count(count: u8) -> Result<CommandLine, EncodeError> {
    if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
        return Err(EncodeError::CountOutOfRange);
    }
    let mut line = CommandLine::new();
    write!(line, "{}{}", COUNT_PREFIX, count).map_err(|_| EncodeError::LineTooLong)?;
    terminate(line)
}

/// Encode a `B:` command from pulse durations in milliseconds
pub fn encode_pattern(durations_ms: &[u32]) -> Result<CommandLine, EncodeError> {
    if durations_ms.is_empty() {
        return Err(EncodeError::EmptyPattern);
    }
    let mut line = CommandLine::new();
    line.push_str(PATTERN_PREFIX)
        .map_err(|_| EncodeError::LineTooLong)?;
    for (i, ms) in durations_ms.iter().enumerate() {
        if i > 0 {
            line.push(',').map_err(|_| EncodeError::LineTooLong)?;
        }
        write!(line, "{}", ms).map_err(|_| EncodeError::LineTooLong)?;
    }
    terminate(line)
}

fn terminate(mut line: CommandLine) -> Result<CommandLine, EncodeError> {
    // The terminator slot is reserved, so only the body can overflow
    if line.len() > MAX_LINE_LEN {
        return Err(EncodeError::LineTooLong);
    }
    line.push(LINE_TERMINATOR as char)
        .map_err(|_| EncodeError::LineTooLong)?;
    Ok(line)
}

/// Encodes vibration counts for a specific firmware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostEncoder {
    variant: ProtocolVariant,
    pulse_ms: u32,
}

impl HostEncoder {
    /// Create an encoder matching the firmware's protocol variant
    ///
    /// `pulse_ms` is the pulse length used when a count has to be
    /// translated into a pattern.
    pub fn for_variant(variant: ProtocolVariant, pulse_ms: u32) -> Self {
        Self { variant, pulse_ms }
    }

    /// Protocol variant this encoder targets
    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Encode a vibration count
    ///
    /// Returns `Ok(None)` for a count of 0, which means no actuation.
    pub fn encode(&self, count: u8) -> Result<Option<CommandLine>, EncodeError> {
        if count == 0 {
            return Ok(None);
        }
        if count > MAX_COUNT {
            return Err(EncodeError::CountOutOfRange);
        }
        let line = match self.variant {
            ProtocolVariant::Dual => encode_count(count)?,
            ProtocolVariant::PatternOnly => {
                let pulses = [self.pulse_ms; MAX_COUNT as usize];
                encode_pattern(&pulses[..count as usize])?
            }
        };
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_count() {
        assert_eq!(encode_count(3).unwrap().as_str(), "V:3\n");
        assert_eq!(encode_count(10).unwrap().as_str(), "V:10\n");
        assert_eq!(encode_count(0), Err(EncodeError::CountOutOfRange));
        assert_eq!(encode_count(11), Err(EncodeError::CountOutOfRange));
    }

    #[test]
    fn test_encode_pattern() {
        assert_eq!(
            encode_pattern(&[200, 150, 400]).unwrap().as_str(),
            "B:200,150,400\n"
        );
        assert_eq!(encode_pattern(&[]), Err(EncodeError::EmptyPattern));
    }

    #[test]
    fn test_encode_pattern_too_long() {
        let pulses = [10000u32; 40];
        assert_eq!(encode_pattern(&pulses), Err(EncodeError::LineTooLong));
    }

    #[test]
    fn test_dual_encoder_uses_count() {
        let encoder = HostEncoder::for_variant(ProtocolVariant::Dual, 200);
        assert_eq!(encoder.encode(2).unwrap().unwrap().as_str(), "V:2\n");
    }

    #[test]
    fn test_pattern_only_encoder_translates() {
        let encoder = HostEncoder::for_variant(ProtocolVariant::PatternOnly, 200);
        assert_eq!(
            encoder.encode(3).unwrap().unwrap().as_str(),
            "B:200,200,200\n"
        );
    }

    #[test]
    fn test_zero_count_sends_nothing() {
        let encoder = HostEncoder::for_variant(ProtocolVariant::Dual, 200);
        assert_eq!(encoder.encode(0), Ok(None));
        assert_eq!(encoder.encode(11), Err(EncodeError::CountOutOfRange));
    }
}
