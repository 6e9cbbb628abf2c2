//! Line framing for the serial command stream.
//!
//! Bytes are accumulated until a `\n` terminator. The completed line has
//! trailing `\r` and surrounding whitespace removed; lines that end up empty
//! are dropped without being reported.
//!
//! The buffer is bounded. Leading whitespace is never buffered and a `\r`
//! directly before `\n` belongs to the terminator, so neither counts towards
//! the limit. A line longer than [`MAX_LINE_LEN`] is reported once and the
//! rest of it is discarded up to the next terminator.

use heapless::String;

/// Line terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum line length in bytes, excluding leading whitespace and the
/// `\n` or `\r\n` terminator
pub const MAX_LINE_LEN: usize = 128;

/// A complete, trimmed, non-empty command line
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramerError {
    /// Line exceeded [`MAX_LINE_LEN`] before its terminator
    LineTooLong,
    /// Line contained a byte outside the ASCII range
    NonAscii,
}

/// Streaming line framer
#[derive(Debug, Clone)]
pub struct LineFramer {
    state: FrameState,
    buffer: Line,
    /// A `\r` was received and is not yet known to end the line
    cr_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    /// Accumulating bytes of the current line
    Collecting,
    /// Current line contained a non-ASCII byte; report at terminator
    Invalid,
    /// Overflowed; dropping bytes until the next terminator
    Discarding,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create a new, empty framer
    pub const fn new() -> Self {
        Self {
            state: FrameState::Collecting,
            buffer: String::new(),
            cr_pending: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.state = FrameState::Collecting;
        self.buffer.clear();
        self.cr_pending = false;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the framer
    ///
    /// Returns `Ok(Some(line))` when a non-empty line is complete,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current
    /// line has to be rejected.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, FramerError> {
        if byte == LINE_TERMINATOR {
            let state = self.state;
            let line = self.take_line();
            return match state {
                FrameState::Collecting => Ok(line),
                FrameState::Invalid => Err(FramerError::NonAscii),
                // Already reported when the overflow happened
                FrameState::Discarding => Ok(None),
            };
        }

        if self.state == FrameState::Discarding {
            return Ok(None);
        }
        if self.state == FrameState::Collecting
            && self.buffer.is_empty()
            && byte.is_ascii_whitespace()
        {
            return Ok(None);
        }

        // The held `\r` was not followed by `\n`, so it is line content
        if self.cr_pending {
            self.cr_pending = false;
            self.accept(b'\r')?;
        }
        if byte == b'\r' {
            self.cr_pending = true;
            return Ok(None);
        }
        self.accept(byte)
    }

    /// Feed multiple bytes to the framer
    ///
    /// Returns the first complete line or error found, together with the
    /// number of bytes consumed. Bytes after that point are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<Line>, FramerError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (i + 1, other),
            }
        }
        (bytes.len(), Ok(None))
    }

    fn accept(&mut self, byte: u8) -> Result<Option<Line>, FramerError> {
        match self.state {
            FrameState::Discarding => Ok(None),
            FrameState::Invalid => self.push(b' '),
            FrameState::Collecting => {
                if !byte.is_ascii() {
                    self.state = FrameState::Invalid;
                    return self.push(b' ');
                }
                self.push(byte)
            }
        }
    }

    fn push(&mut self, byte: u8) -> Result<Option<Line>, FramerError> {
        // Only ASCII reaches here, so a byte is always one char
        if self.buffer.push(byte as char).is_err() {
            self.buffer.clear();
            self.state = FrameState::Discarding;
            return Err(FramerError::LineTooLong);
        }
        Ok(None)
    }

    fn take_line(&mut self) -> Option<Line> {
        let trimmed = self.buffer.trim();
        let line = if trimmed.is_empty() {
            None
        } else {
            let mut line = Line::new();
            // trimmed is a slice of a buffer with the same capacity
            let _ = line.push_str(trimmed);
            Some(line)
        };
        self.reset();
        line
    }
}
