//! Byte intake for the command loop
//!
//! Wraps the line framer and turns framing failures and transport
//! overruns into the `ERR:` lines sent back to the host.

use tactus_protocol::{ErrorKind, Line, LineFramer, Response};

/// What a received byte completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// More bytes are needed
    Pending,
    /// A trimmed, non-empty command line
    Line(Line),
    /// The current line was rejected with this response
    Rejected(Response<'static>),
}

/// Frames incoming bytes and reports rejected input
#[derive(Debug, Clone, Default)]
pub struct LineReceiver {
    framer: LineFramer,
}

impl LineReceiver {
    /// Create a receiver with an empty framer
    pub const fn new() -> Self {
        Self {
            framer: LineFramer::new(),
        }
    }

    /// Feed one byte
    pub fn feed(&mut self, byte: u8) -> Received {
        match self.framer.feed(byte) {
            Ok(Some(line)) => Received::Line(line),
            Ok(None) => Received::Pending,
            Err(e) => Received::Rejected(Response::Error(e.into())),
        }
    }

    /// Drop the partial line after input was lost
    ///
    /// Returns the response reporting the loss.
    pub fn overrun(&mut self) -> Response<'static> {
        self.framer.reset();
        Response::Error(ErrorKind::ReceiveOverrun)
    }

    /// Bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.framer.pending()
    }
}
