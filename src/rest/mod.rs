//! Hypixel REST API client.
//!
//! [`HypixelClient`] is the entry point. Each call flows through:
//!
//! 1. the optional response cache
//! 2. the admission queue and rate limit throttle (authenticated calls only)
//! 3. the [`Transport`] with timeout and cancellation
//! 4. status classification and a bounded retry loop
//!
//! Endpoint wrappers live in [`public`] (no API key) and [`private`]
//! (API key, rate limited). [`HypixelClient::call`] reaches any other path.

mod client;
pub mod endpoints;
mod options;
pub mod private;
pub mod public;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    API_KEY_HEADER, ClientConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT, HypixelClient, HypixelClientBuilder,
};
pub use endpoints::{HYPIXEL_BASE_URL, requires_auth};
pub use options::RequestOptions;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
