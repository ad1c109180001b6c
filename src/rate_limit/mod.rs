//! Rate limiting for the Hypixel API.
//!
//! Hypixel limits each API key to a fixed number of requests per window and
//! reports the current quota in the headers of every authenticated response.
//! This client does not guess the quota: it reads it back from the server and
//! self-throttles once `remaining` reaches zero.
//!
//! ## Building Blocks
//!
//! - [`RateLimitState`]: the last quota the server reported
//! - [`AdmissionQueue`]: a FIFO single-slot gate so only one authenticated call
//!   at a time runs the "are we limited?" check
//! - [`RateLimitEvents`]: `Limited` / `Reset` notifications
//!
//! Unauthenticated endpoints (resources, public auctions, ended auctions and
//! the bazaar) bypass all of this.
//!
//! ## Example
//!
//! ```rust
//! use hypixel_api_client::rate_limit::{RateLimitHeaders, RateLimitState};
//! use reqwest::header::{HeaderMap, HeaderValue};
//!
//! let state = RateLimitState::new();
//! let mut headers = HeaderMap::new();
//! headers.insert("ratelimit-limit", HeaderValue::from_static("120"));
//! headers.insert("ratelimit-remaining", HeaderValue::from_static("0"));
//! headers.insert("ratelimit-reset", HeaderValue::from_static("42"));
//!
//! state.apply(RateLimitHeaders::parse(&headers));
//! assert!(state.read().is_exhausted());
//! ```

mod events;
mod queue;
mod state;

pub use events::{DEFAULT_EVENT_CAPACITY, RateLimitEvent, RateLimitEvents};
pub use queue::{AdmissionPermit, AdmissionQueue};
pub use state::{
    LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER, RateLimitData, RateLimitHeaders, RateLimitState,
};

pub(crate) use state::{millis_to_datetime, now_millis};
