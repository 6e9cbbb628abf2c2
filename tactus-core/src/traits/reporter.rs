//! Status line sink

use tactus_protocol::Response;

/// Receives status lines produced while handling a command
///
/// Implementations typically encode the response and queue it for the
/// serial transmitter.
pub trait Reporter {
    /// Emit one status line
    fn report(&mut self, response: &Response<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, response: &Response<'_>) {
        (**self).report(response)
    }
}
