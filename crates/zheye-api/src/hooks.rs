// Request interception hooks
//
// Every request issued by `ApiClient` passes through a `RequestHooks`
// implementation. The store uses this seam to drive its global loading
// and error signaling without the request helpers knowing about it.

use crate::error::Error;

/// Observer invoked around every request the client sends.
///
/// Exactly one of [`on_success`](Self::on_success) or
/// [`on_failure`](Self::on_failure) follows each
/// [`on_request`](Self::on_request).
pub trait RequestHooks: Send + Sync {
    /// Called before the request is sent.
    fn on_request(&self) {}

    /// Called after a response was received and decoded.
    fn on_success(&self) {}

    /// Called when the request failed for any reason.
    fn on_failure(&self, _error: &Error) {}
}

/// Hooks that do nothing. Installed by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl RequestHooks for NoopHooks {}
