//! Pulse patterns and the `B:` payload parser
//!
//! A payload is a comma-separated list of pulse durations in milliseconds.
//! Segments are processed left to right:
//!
//! 1. surrounding whitespace is trimmed
//! 2. empty segments are skipped silently (`200,,300` is two pulses)
//! 3. segments that are not a positive integer produce a warning and are
//!    skipped
//! 4. values above the configured maximum produce a warning and are clamped
//!
//! Only an empty payload rejects the whole command.

use heapless::Vec;
use tactus_protocol::{ErrorKind, Warning};

/// Maximum pulses in one pattern
///
/// A maximum-length line cannot hold more segments than this.
pub const MAX_PATTERN_PULSES: usize = 64;

/// Warnings collected while parsing one payload
pub type Warnings<'a> = Vec<Warning<'a>, MAX_PATTERN_PULSES>;

/// Errors that reject a whole command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// `B:` payload is empty
    EmptyPayload,
    /// `V:` payload is not an integer in 1-10
    CountOutOfRange,
    /// Pattern holds more than [`MAX_PATTERN_PULSES`] pulses
    PatternTooLong,
}

impl CommandError {
    /// Protocol error reported for this failure
    pub fn kind(self) -> ErrorKind {
        match self {
            CommandError::EmptyPayload => ErrorKind::EmptyPayload,
            CommandError::CountOutOfRange => ErrorKind::CountOutOfRange,
            CommandError::PatternTooLong => ErrorKind::PatternTooLong,
        }
    }
}

/// A single pulse length in milliseconds, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseDuration(u32);

impl PulseDuration {
    /// Create a duration in `1..=max_ms`
    pub fn new(ms: u32, max_ms: u32) -> Option<Self> {
        if ms == 0 || ms > max_ms {
            None
        } else {
            Some(Self(ms))
        }
    }

    /// Duration in milliseconds
    pub fn as_millis(self) -> u32 {
        self.0
    }
}

/// Ordered sequence of pulses for one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    pulses: Vec<PulseDuration, MAX_PATTERN_PULSES>,
}

impl Pattern {
    /// Create an empty pattern
    pub const fn new() -> Self {
        Self { pulses: Vec::new() }
    }

    /// Append a pulse
    pub fn push(&mut self, pulse: PulseDuration) -> Result<(), CommandError> {
        self.pulses
            .push(pulse)
            .map_err(|_| CommandError::PatternTooLong)
    }

    /// Number of pulses
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// Returns true if the pattern has no pulses
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Pulses in playback order
    pub fn pulses(&self) -> &[PulseDuration] {
        &self.pulses
    }

    /// Pulse lengths in milliseconds, in playback order
    pub fn durations_ms(&self) -> impl Iterator<Item = u32> + '_ {
        self.pulses.iter().map(|p| p.as_millis())
    }
}

/// Result of parsing a `B:` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern<'a> {
    /// Accepted pulses, possibly empty
    pub pattern: Pattern,
    /// Warnings in payload order
    pub warnings: Warnings<'a>,
}

/// Parse a `B:` payload
///
/// `max_pulse_ms` is the clamp limit for individual pulses.
pub fn parse_pattern(payload: &str, max_pulse_ms: u32) -> Result<ParsedPattern<'_>, CommandError> {
    if payload.is_empty() {
        return Err(CommandError::EmptyPayload);
    }

    let mut parsed = ParsedPattern {
        pattern: Pattern::new(),
        warnings: Vec::new(),
    };

    for segment in payload.split(',').map(str::trim) {
        if segment.is_empty() {
            continue;
        }

        let value = match parse_segment(segment) {
            Some(v) if v > 0 => v,
            _ => {
                warn(&mut parsed.warnings, Warning::InvalidPulse(segment))?;
                continue;
            }
        };

        let ms = if value > i64::from(max_pulse_ms) {
            warn(
                &mut parsed.warnings,
                Warning::ClampedPulse {
                    segment,
                    max_ms: max_pulse_ms,
                },
            )?;
            max_pulse_ms
        } else {
            value as u32
        };

        // A zero clamp limit leaves nothing playable
        if let Some(pulse) = PulseDuration::new(ms, max_pulse_ms) {
            parsed.pattern.push(pulse)?;
        }
    }

    Ok(parsed)
}

fn warn<'a>(warnings: &mut Warnings<'a>, warning: Warning<'a>) -> Result<(), CommandError> {
    warnings
        .push(warning)
        .map_err(|_| CommandError::PatternTooLong)
}

/// Parse an optionally signed decimal integer
///
/// Saturates instead of overflowing, so very long digit strings still
/// compare as "too large" rather than wrapping.
fn parse_segment(segment: &str) -> Option<i64> {
    let (negative, digits) = match segment.as_bytes().first()? {
        b'-' => (true, &segment[1..]),
        b'+' => (false, &segment[1..]),
        _ => (false, segment),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_PULSE_MS;

    fn durations(parsed: &ParsedPattern<'_>) -> Vec<u32, MAX_PATTERN_PULSES> {
        parsed.pattern.durations_ms().collect()
    }

    #[test]
    fn test_well_formed_payload() {
        let parsed = parse_pattern("200,150,400", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [200, 150, 400]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let parsed = parse_pattern(" 200 ,\t300 ", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [200, 300]);
    }

    #[test]
    fn test_clamps_large_value() {
        let parsed = parse_pattern("99999", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [10_000]);
        assert_eq!(
            parsed.warnings.as_slice(),
            [Warning::ClampedPulse {
                segment: "99999",
                max_ms: 10_000
            }]
        );
    }

    #[test]
    fn test_max_value_not_clamped() {
        let parsed = parse_pattern("10000", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [10_000]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_empty_segments_skipped_silently() {
        let parsed = parse_pattern("200,,300", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [200, 300]);
        assert!(parsed.warnings.is_empty());

        let parsed = parse_pattern(",,", MAX_PULSE_MS).unwrap();
        assert!(parsed.pattern.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_negative_value_warns_and_skips() {
        let parsed = parse_pattern("-100,200", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [200]);
        assert_eq!(parsed.warnings.as_slice(), [Warning::InvalidPulse("-100")]);
    }

    #[test]
    fn test_zero_and_garbage_are_invalid() {
        let parsed = parse_pattern("0,abc,12x,-,300", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [300]);
        assert_eq!(
            parsed.warnings.as_slice(),
            [
                Warning::InvalidPulse("0"),
                Warning::InvalidPulse("abc"),
                Warning::InvalidPulse("12x"),
                Warning::InvalidPulse("-"),
            ]
        );
    }

    #[test]
    fn test_huge_digit_string_clamps() {
        let parsed = parse_pattern("123456789012345678901234567890", MAX_PULSE_MS).unwrap();
        assert_eq!(durations(&parsed), [10_000]);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert_eq!(parse_pattern("", MAX_PULSE_MS), Err(CommandError::EmptyPayload));
    }

    #[test]
    fn test_custom_clamp_limit() {
        let parsed = parse_pattern("50,500", 100).unwrap();
        assert_eq!(durations(&parsed), [50, 100]);
    }

    #[test]
    fn test_too_many_pulses() {
        let mut payload: heapless::String<512> = heapless::String::new();
        for _ in 0..(MAX_PATTERN_PULSES + 1) {
            payload.push_str("5,").unwrap();
        }
        assert_eq!(
            parse_pattern(&payload, MAX_PULSE_MS),
            Err(CommandError::PatternTooLong)
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CommandError::EmptyPayload.kind(), ErrorKind::EmptyPayload);
        assert_eq!(CommandError::CountOutOfRange.kind(), ErrorKind::CountOutOfRange);
        assert_eq!(CommandError::PatternTooLong.kind(), ErrorKind::PatternTooLong);
    }
}
