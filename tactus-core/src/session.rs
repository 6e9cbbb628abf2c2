//! Per-line command handling
//!
//! A [`Session`] takes one complete line through the whole pipeline:
//! echo, dispatch, pattern construction, playback and the summary line.
//! It keeps no state between lines, so the same line always produces the
//! same outcome.
//!
//! The work is split in two so async transports can stream the status
//! lines out before playback starts:
//! - [`Session::prepare`] validates the line and yields the responses that
//!   precede playback plus an optional [`PlaybackJob`]
//! - the job is then played and its [`PlaybackResult`] gives the summary

use core::iter;

use embedded_hal::delay::DelayNs as BlockingDelay;
use tactus_protocol::{Command, ErrorKind, Response, Warning};

use crate::config::ProtocolConfig;
use crate::count::{count_pattern, parse_count};
use crate::pattern::{parse_pattern, CommandError, Warnings};
use crate::playback::{GapPolicy, PlaybackExecutor, PlaybackJob, PlaybackResult};
use crate::traits::{Actuator, Reporter};

/// A line that has been echoed, dispatched and validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared<'a> {
    line: &'a str,
    outcome: Result<PlaybackJob<'a>, ErrorKind>,
}

impl<'a> Prepared<'a> {
    /// The received line
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Error that rejected the line, if any
    pub fn error(&self) -> Option<ErrorKind> {
        self.outcome.as_ref().err().copied()
    }

    /// Status lines to send before playback
    ///
    /// Always starts with the `RX:` echo, followed by either one `ERR:`
    /// line or the `WARN:` lines of the pattern.
    pub fn responses(&self) -> impl Iterator<Item = Response<'a>> + '_ {
        let warnings: &[Warning<'a>] = match &self.outcome {
            Ok(job) => job.warnings(),
            Err(_) => &[],
        };
        iter::once(Response::Received(self.line))
            .chain(self.error().map(Response::Error))
            .chain(warnings.iter().copied().map(Response::Warning))
    }

    /// The job to play, unless the line was rejected
    pub fn into_job(self) -> Option<PlaybackJob<'a>> {
        self.outcome.ok()
    }
}

/// Handles command lines with a fixed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    config: ProtocolConfig,
    executor: PlaybackExecutor,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

impl Session {
    /// Create a session
    pub const fn new(config: ProtocolConfig) -> Self {
        Self {
            config,
            executor: PlaybackExecutor::new(config.gap_ms),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Executor used for playback
    pub fn executor(&self) -> &PlaybackExecutor {
        &self.executor
    }

    /// Startup banner for this protocol variant
    pub fn banner(&self) -> Response<'static> {
        Response::Ready(self.config.variant)
    }

    /// Dispatch and validate a trimmed, non-empty line
    pub fn prepare<'a>(&self, line: &'a str) -> Prepared<'a> {
        let outcome = match Command::classify(line, self.config.variant) {
            Command::Pattern(payload) => parse_pattern(payload, self.config.max_pulse_ms)
                .map(|parsed| PlaybackJob::new(parsed.pattern, GapPolicy::Trailing, parsed.warnings))
                .map_err(CommandError::kind),
            Command::Count(payload) => parse_count(payload)
                .map(|count| {
                    PlaybackJob::new(
                        count_pattern(count, self.config.pulse_ms),
                        GapPolicy::BetweenOnly,
                        Warnings::new(),
                    )
                })
                .map_err(CommandError::kind),
            Command::Unknown => Err(ErrorKind::UnknownCommand(self.config.variant)),
        };

        Prepared { line, outcome }
    }

    /// Handle one line from start to finish with a blocking delay
    ///
    /// Returns the playback result, or `None` if the line was rejected.
    pub fn process_blocking<'a, R, A, D>(
        &self,
        line: &'a str,
        reporter: &mut R,
        actuator: &mut A,
        delay: &mut D,
    ) -> Option<PlaybackResult<'a>>
    where
        R: Reporter,
        A: Actuator,
        D: BlockingDelay,
    {
        let prepared = self.prepare(line);
        for response in prepared.responses() {
            reporter.report(&response);
        }

        let result = prepared.into_job()?.play(&self.executor, actuator, delay);
        if let Some(done) = result.completion() {
            reporter.report(&done);
        }
        Some(result)
    }
}
