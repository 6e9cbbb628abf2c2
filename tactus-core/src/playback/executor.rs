//! Playback executor
//!
//! Drives the actuator through a pattern. Each step blocks the caller for
//! its full duration and cannot be interrupted, so one command's pattern
//! always finishes before the next command is read.
//!
//! Two flavours are provided with identical timing: [`PlaybackExecutor::play`]
//! for blocking delays and [`PlaybackExecutor::play_async`] for async
//! executors such as Embassy.

use embedded_hal::delay::DelayNs as BlockingDelay;
use embedded_hal_async::delay::DelayNs as AsyncDelay;
use tactus_protocol::Response;

use super::step::{steps, GapPolicy, Step};
use crate::pattern::{Pattern, Warnings};
use crate::traits::Actuator;

/// Outcome of playing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackResult<'a> {
    /// Pulses actually played
    pub pulses_played: usize,
    /// Warnings raised while building the pattern
    pub warnings: Warnings<'a>,
}

impl PlaybackResult<'_> {
    /// Summary line for this playback
    ///
    /// Nothing is reported when no pulse was played.
    pub fn completion(&self) -> Option<Response<'static>> {
        if self.pulses_played == 0 {
            None
        } else {
            Some(Response::Played {
                pulses: self.pulses_played,
            })
        }
    }
}

/// A validated pattern waiting to be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackJob<'a> {
    pattern: Pattern,
    policy: GapPolicy,
    warnings: Warnings<'a>,
}

impl<'a> PlaybackJob<'a> {
    /// Create a job from a pattern and its gap policy
    pub fn new(pattern: Pattern, policy: GapPolicy, warnings: Warnings<'a>) -> Self {
        Self {
            pattern,
            policy,
            warnings,
        }
    }

    /// Pattern to be played
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Gap policy for this job
    pub fn policy(&self) -> GapPolicy {
        self.policy
    }

    /// Warnings raised while building the pattern
    pub fn warnings(&self) -> &[tactus_protocol::Warning<'a>] {
        &self.warnings
    }

    /// Play the job with a blocking delay
    pub fn play<A: Actuator, D: BlockingDelay>(
        self,
        executor: &PlaybackExecutor,
        actuator: &mut A,
        delay: &mut D,
    ) -> PlaybackResult<'a> {
        let pulses_played = executor.play(&self.pattern, self.policy, actuator, delay);
        PlaybackResult {
            pulses_played,
            warnings: self.warnings,
        }
    }

    /// Play the job with an async delay
    pub async fn play_async<A: Actuator, D: AsyncDelay>(
        self,
        executor: &PlaybackExecutor,
        actuator: &mut A,
        delay: &mut D,
    ) -> PlaybackResult<'a> {
        let pulses_played = executor
            .play_async(&self.pattern, self.policy, actuator, delay)
            .await;
        PlaybackResult {
            pulses_played,
            warnings: self.warnings,
        }
    }
}

/// Drives an actuator through patterns with a fixed gap length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackExecutor {
    gap_ms: u32,
}

impl PlaybackExecutor {
    /// Create an executor with the given gap length
    pub const fn new(gap_ms: u32) -> Self {
        Self { gap_ms }
    }

    /// Gap length in milliseconds
    pub fn gap_ms(&self) -> u32 {
        self.gap_ms
    }

    /// Play a pattern, blocking until it is complete
    ///
    /// Returns the number of pulses played.
    pub fn play<A: Actuator, D: BlockingDelay>(
        &self,
        pattern: &Pattern,
        policy: GapPolicy,
        actuator: &mut A,
        delay: &mut D,
    ) -> usize {
        actuator.set_active(false);
        let mut played = 0;

        for step in steps(pattern, self.gap_ms, policy) {
            match step {
                Step::Pulse(ms) => {
                    actuator.set_active(true);
                    delay.delay_ms(ms);
                    actuator.set_active(false);
                    played += 1;
                }
                Step::Gap(ms) => delay.delay_ms(ms),
            }
        }

        played
    }

    /// Play a pattern, awaiting each step
    ///
    /// Returns the number of pulses played.
    pub async fn play_async<A: Actuator, D: AsyncDelay>(
        &self,
        pattern: &Pattern,
        policy: GapPolicy,
        actuator: &mut A,
        delay: &mut D,
    ) -> usize {
        actuator.set_active(false);
        let mut played = 0;

        for step in steps(pattern, self.gap_ms, policy) {
            match step {
                Step::Pulse(ms) => {
                    actuator.set_active(true);
                    delay.delay_ms(ms).await;
                    actuator.set_active(false);
                    played += 1;
                }
                Step::Gap(ms) => delay.delay_ms(ms).await,
            }
        }

        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GAP_MS, MAX_PULSE_MS, PULSE_MS};
    use crate::pattern::PulseDuration;
    use core::cell::RefCell;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        On,
        Off,
        Wait(u32),
    }

    type Log = RefCell<Vec<Event, 64>>;

    /// Mock actuator recording state changes
    struct MockActuator<'l> {
        log: &'l Log,
        active: bool,
    }

    impl Actuator for MockActuator<'_> {
        fn set_active(&mut self, active: bool) {
            self.active = active;
            let event = if active { Event::On } else { Event::Off };
            self.log.borrow_mut().push(event).unwrap();
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    /// Mock delay recording requested waits
    struct MockDelay<'l> {
        log: &'l Log,
    }

    impl BlockingDelay for MockDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Wait(ms)).unwrap();
        }
    }

    impl AsyncDelay for MockDelay<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Wait(ms)).unwrap();
        }
    }

    fn pattern_of(durations: &[u32]) -> Pattern {
        let mut pattern = Pattern::new();
        for &ms in durations {
            pattern.push(PulseDuration::new(ms, MAX_PULSE_MS).unwrap()).unwrap();
        }
        pattern
    }

    #[test]
    fn test_trailing_playback_sequence() {
        let log = Log::default();
        let mut actuator = MockActuator { log: &log, active: false };
        let mut delay = MockDelay { log: &log };
        let executor = PlaybackExecutor::new(GAP_MS);

        let played = executor.play(
            &pattern_of(&[100, 300]),
            GapPolicy::Trailing,
            &mut actuator,
            &mut delay,
        );

        assert_eq!(played, 2);
        assert!(!actuator.is_active());
        assert_eq!(
            log.borrow().as_slice(),
            [
                Event::Off,
                Event::On,
                Event::Wait(100),
                Event::Off,
                Event::Wait(150),
                Event::On,
                Event::Wait(300),
                Event::Off,
                Event::Wait(150),
            ]
        );
    }

    #[test]
    fn test_between_only_playback_sequence() {
        let log = Log::default();
        let mut actuator = MockActuator { log: &log, active: false };
        let mut delay = MockDelay { log: &log };
        let executor = PlaybackExecutor::new(GAP_MS);

        let played = executor.play(
            &pattern_of(&[PULSE_MS, PULSE_MS]),
            GapPolicy::BetweenOnly,
            &mut actuator,
            &mut delay,
        );

        assert_eq!(played, 2);
        assert_eq!(
            log.borrow().as_slice(),
            [
                Event::Off,
                Event::On,
                Event::Wait(200),
                Event::Off,
                Event::Wait(150),
                Event::On,
                Event::Wait(200),
                Event::Off,
            ]
        );
    }

    #[test]
    fn test_async_matches_blocking() {
        let pattern = pattern_of(&[50, 60, 70]);
        let executor = PlaybackExecutor::new(25);

        let blocking_log = Log::default();
        executor.play(
            &pattern,
            GapPolicy::Trailing,
            &mut MockActuator { log: &blocking_log, active: false },
            &mut MockDelay { log: &blocking_log },
        );

        let async_log = Log::default();
        let played = embassy_futures::block_on(executor.play_async(
            &pattern,
            GapPolicy::Trailing,
            &mut MockActuator { log: &async_log, active: false },
            &mut MockDelay { log: &async_log },
        ));

        assert_eq!(played, 3);
        assert_eq!(blocking_log.borrow().as_slice(), async_log.borrow().as_slice());
    }

    #[test]
    fn test_empty_pattern_reports_nothing() {
        let log = Log::default();
        let job = PlaybackJob::new(Pattern::new(), GapPolicy::Trailing, Vec::new());
        let result = job.play(
            &PlaybackExecutor::new(GAP_MS),
            &mut MockActuator { log: &log, active: false },
            &mut MockDelay { log: &log },
        );

        assert_eq!(result.pulses_played, 0);
        assert_eq!(result.completion(), None);
        assert!(!log.borrow().iter().any(|e| *e == Event::On));
    }

    #[test]
    fn test_completion_line() {
        let result = PlaybackResult {
            pulses_played: 3,
            warnings: Vec::new(),
        };
        assert_eq!(result.completion(), Some(Response::Played { pulses: 3 }));
    }
}
