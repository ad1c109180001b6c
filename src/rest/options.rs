//! Per-call options.

use tokio_util::sync::CancellationToken;

/// Options accepted by every call.
///
/// ```rust
/// use hypixel_api_client::RequestOptions;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let options = RequestOptions::new().cancel_with(token.clone()).no_store();
/// assert!(options.no_store);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Cancels the call while queued, throttled or in flight.
    pub cancel: Option<CancellationToken>,
    /// Do not store the fresh response in the cache.
    pub no_store: bool,
    /// Skip the cache lookup and storage entirely.
    pub bypass_cache: bool,
}

impl RequestOptions {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation token.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Skip storing the response.
    pub fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    /// Skip the cache entirely.
    pub fn bypass_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }

    pub(crate) fn cancellation(&self) -> CancellationToken {
        self.cancel.clone().unwrap_or_default()
    }
}
