//! Vibration counts and the `V:` payload converter
//!
//! A count is turned into a fixed-cadence pattern of identical pulses.
//! Unlike pulse durations, counts outside 1-10 are rejected, never clamped.

use tactus_protocol::{MAX_COUNT, MIN_COUNT};

use crate::pattern::{CommandError, Pattern, PulseDuration};

/// Number of vibrations, always in 1-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibrationCount(u8);

impl VibrationCount {
    /// Create a count in `1..=10`
    pub fn new(count: u8) -> Option<Self> {
        if (MIN_COUNT..=MAX_COUNT).contains(&count) {
            Some(Self(count))
        } else {
            None
        }
    }

    /// The count as an integer
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Parse a `V:` payload
///
/// The payload is trimmed and must then consist of decimal digits only.
pub fn parse_count(payload: &str) -> Result<VibrationCount, CommandError> {
    let digits = payload.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::CountOutOfRange);
    }

    // Anything longer than a few digits is out of range anyway
    let value = digits
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')));

    u8::try_from(value)
        .ok()
        .and_then(VibrationCount::new)
        .ok_or(CommandError::CountOutOfRange)
}

/// Build the pattern for a count: `count` pulses of `pulse_ms` each
pub fn count_pattern(count: VibrationCount, pulse_ms: u32) -> Pattern {
    let mut pattern = Pattern::new();
    if let Some(pulse) = PulseDuration::new(pulse_ms, pulse_ms) {
        for _ in 0..count.get() {
            // At most MAX_COUNT pulses, well below pattern capacity
            let _ = pattern.push(pulse);
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PULSE_MS;

    #[test]
    fn test_valid_counts() {
        for n in 1..=10u8 {
            let mut payload: heapless::String<4> = heapless::String::new();
            core::fmt::Write::write_fmt(&mut payload, format_args!("{}", n)).unwrap();
            assert_eq!(parse_count(&payload).map(VibrationCount::get), Ok(n));
        }
    }

    #[test]
    fn test_out_of_range_counts() {
        for payload in ["0", "11", "abc", "", "-1", "3x", "99999999999"] {
            assert_eq!(parse_count(payload), Err(CommandError::CountOutOfRange));
        }
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(parse_count(" 4 ").map(VibrationCount::get), Ok(4));
    }

    #[test]
    fn test_count_pattern() {
        let count = VibrationCount::new(3).unwrap();
        let pattern = count_pattern(count, PULSE_MS);
        assert_eq!(pattern.len(), 3);
        assert!(pattern.durations_ms().all(|ms| ms == PULSE_MS));
    }

    #[test]
    fn test_count_bounds() {
        assert!(VibrationCount::new(0).is_none());
        assert!(VibrationCount::new(1).is_some());
        assert!(VibrationCount::new(10).is_some());
        assert!(VibrationCount::new(11).is_none());
    }
}
