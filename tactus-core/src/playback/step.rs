//! Timed playback steps

use crate::pattern::{Pattern, PulseDuration};

/// Where gaps are inserted between pulses
///
/// `B:` and `V:` commands have always differed here and hosts depend on
/// the exact timing of each, so the policy is chosen per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GapPolicy {
    /// Gap after every pulse, including the last (`B:` commands)
    Trailing,
    /// Gap between pulses only (`V:` commands)
    BetweenOnly,
}

impl GapPolicy {
    /// Whether a gap follows the pulse at `index` in a pattern of `len`
    pub fn gap_after(self, index: usize, len: usize) -> bool {
        match self {
            GapPolicy::Trailing => index < len,
            GapPolicy::BetweenOnly => index + 1 < len,
        }
    }
}

/// One timed actuator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Actuator on for the given milliseconds
    Pulse(u32),
    /// Actuator off for the given milliseconds
    Gap(u32),
}

impl Step {
    /// Duration of this step in milliseconds
    pub fn duration_ms(self) -> u32 {
        match self {
            Step::Pulse(ms) | Step::Gap(ms) => ms,
        }
    }

    /// Returns true if the actuator is on during this step
    pub fn is_pulse(self) -> bool {
        matches!(self, Step::Pulse(_))
    }
}

/// Iterator over the steps of a pattern
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    pulses: &'a [PulseDuration],
    gap_ms: u32,
    policy: GapPolicy,
    index: usize,
    gap_pending: bool,
}

/// Expand a pattern into steps
pub fn steps(pattern: &Pattern, gap_ms: u32, policy: GapPolicy) -> Steps<'_> {
    Steps {
        pulses: pattern.pulses(),
        gap_ms,
        policy,
        index: 0,
        gap_pending: false,
    }
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.gap_pending {
            self.gap_pending = false;
            return Some(Step::Gap(self.gap_ms));
        }

        let pulse = self.pulses.get(self.index)?;
        self.index += 1;
        self.gap_pending = self.policy.gap_after(self.index - 1, self.pulses.len());
        Some(Step::Pulse(pulse.as_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GAP_MS, MAX_PULSE_MS};
    use heapless::Vec;

    fn pattern_of(durations: &[u32]) -> Pattern {
        let mut pattern = Pattern::new();
        for &ms in durations {
            pattern.push(PulseDuration::new(ms, MAX_PULSE_MS).unwrap()).unwrap();
        }
        pattern
    }

    fn collect(pattern: &Pattern, policy: GapPolicy) -> Vec<Step, 32> {
        steps(pattern, GAP_MS, policy).collect()
    }

    #[test]
    fn test_trailing_gap_policy() {
        let pattern = pattern_of(&[200, 200, 200]);
        assert_eq!(
            collect(&pattern, GapPolicy::Trailing),
            [
                Step::Pulse(200),
                Step::Gap(150),
                Step::Pulse(200),
                Step::Gap(150),
                Step::Pulse(200),
                Step::Gap(150),
            ]
        );
    }

    #[test]
    fn test_between_only_gap_policy() {
        let pattern = pattern_of(&[200, 200, 200]);
        assert_eq!(
            collect(&pattern, GapPolicy::BetweenOnly),
            [
                Step::Pulse(200),
                Step::Gap(150),
                Step::Pulse(200),
                Step::Gap(150),
                Step::Pulse(200),
            ]
        );
    }

    #[test]
    fn test_single_pulse() {
        let pattern = pattern_of(&[500]);
        assert_eq!(
            collect(&pattern, GapPolicy::Trailing),
            [Step::Pulse(500), Step::Gap(150)]
        );
        assert_eq!(collect(&pattern, GapPolicy::BetweenOnly), [Step::Pulse(500)]);
    }

    #[test]
    fn test_empty_pattern_has_no_steps() {
        let pattern = Pattern::new();
        assert!(collect(&pattern, GapPolicy::Trailing).is_empty());
        assert!(collect(&pattern, GapPolicy::BetweenOnly).is_empty());
    }

    #[test]
    fn test_step_helpers() {
        assert_eq!(Step::Pulse(10).duration_ms(), 10);
        assert_eq!(Step::Gap(20).duration_ms(), 20);
        assert!(Step::Pulse(10).is_pulse());
        assert!(!Step::Gap(10).is_pulse());
    }
}
