//! Pluggable response caching.
//!
//! A [`ResponseCache`] stores whole response envelopes under a key derived from
//! the request path and parameters (see [`cache_key`]). When one is configured
//! on the client, a hit answers the call without touching the network, the
//! admission queue or the rate limit. A miss goes through the normal call path
//! and the fresh envelope is stored before the call resolves.
//!
//! The client imposes no expiry policy. Backends decide how long entries live;
//! [`MemoryCache`] offers an optional TTL.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use hypixel_api_client::HypixelClient;
//! use hypixel_api_client::cache::MemoryCache;
//!
//! # fn main() -> Result<(), hypixel_api_client::HypixelError> {
//! let cache = Arc::new(MemoryCache::with_ttl(Duration::from_secs(300)));
//! let client = HypixelClient::builder("00000000-0000-0000-0000-000000000000")
//!     .cache(cache)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryCache;

use futures_util::future::BoxFuture;

use crate::error::HypixelError;
use crate::types::Envelope;

/// A storage backend for response envelopes.
///
/// Futures are boxed so backends can be shared as `Arc<dyn ResponseCache>`.
/// Errors returned here fail the call that triggered them.
pub trait ResponseCache: Send + Sync {
    /// Look up a stored envelope.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Envelope>, HypixelError>>;

    /// Store an envelope.
    fn set<'a>(&'a self, key: &'a str, value: &'a Envelope) -> BoxFuture<'a, Result<(), HypixelError>>;
}

/// Build the cache key for a request.
///
/// The path has its `/` separators replaced by `:`. When parameters are
/// present, a `:` and the parameter values follow, each lower-cased with `-`
/// removed and joined by `,`. UUIDs with and without dashes therefore share an
/// entry.
///
/// ```rust
/// use hypixel_api_client::cache::cache_key;
///
/// assert_eq!(cache_key("skyblock/bazaar", &[]), "skyblock:bazaar");
/// assert_eq!(cache_key("player", &[("uuid", "ABC-123")]), "player:abc123");
/// ```
pub fn cache_key(path: &str, params: &[(&str, &str)]) -> String {
    let mut key = path.replace('/', ":");
    if !params.is_empty() {
        let values: Vec<String> = params
            .iter()
            .map(|(_, value)| value.to_lowercase().replace('-', ""))
            .collect();
        key.push(':');
        key.push_str(&values.join(","));
    }
    key
}
