//! Server-reported rate limit state.
//!
//! Hypixel reports the quota of the key on every authenticated response:
//!
//! - `ratelimit-limit`: requests allowed per window
//! - `ratelimit-remaining`: requests left in the current window
//! - `ratelimit-reset`: seconds until the window resets
//!
//! The reset is anchored to the response's own `Date` header so the absolute
//! reset time follows the server clock rather than the local one.

use std::sync::{Mutex, PoisonError};

use reqwest::header::{DATE, HeaderMap};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Header carrying the per-window request allowance.
pub const LIMIT_HEADER: &str = "ratelimit-limit";
/// Header carrying the requests left in the current window.
pub const REMAINING_HEADER: &str = "ratelimit-remaining";
/// Header carrying the seconds until the window resets.
pub const RESET_HEADER: &str = "ratelimit-reset";

/// A snapshot of the rate limit state.
///
/// `-1` in any field means the value has never been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitData {
    /// How many requests per window the API key can make.
    pub limit: i64,
    /// Remaining API calls until the limit resets.
    pub remaining: i64,
    /// When the window resets, in epoch milliseconds.
    pub reset: i64,
}

impl RateLimitData {
    /// State before any authenticated response was seen.
    pub const UNKNOWN: Self = Self {
        limit: -1,
        remaining: -1,
        reset: -1,
    };

    /// Whether the server reported an exhausted quota.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// The reset time as a date, if known.
    pub fn reset_at(&self) -> Option<OffsetDateTime> {
        if self.reset < 0 {
            return None;
        }
        millis_to_datetime(self.reset)
    }
}

impl Default for RateLimitData {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Rate limit values parsed out of one response.
///
/// Fields are `None` when the header was absent or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Parsed `ratelimit-limit`.
    pub limit: Option<i64>,
    /// Parsed `ratelimit-remaining`.
    pub remaining: Option<i64>,
    /// Absolute reset time in epoch milliseconds.
    pub reset: Option<i64>,
}

impl RateLimitHeaders {
    /// Parse the rate limit headers, anchoring the reset to the `Date` header.
    pub fn parse(headers: &HeaderMap) -> Self {
        Self::parse_at(headers, now_millis())
    }

    /// Parse with an explicit fallback "now" used when `Date` is unusable.
    pub fn parse_at(headers: &HeaderMap, now_ms: i64) -> Self {
        let limit = header_i64(headers, LIMIT_HEADER);
        let remaining = header_i64(headers, REMAINING_HEADER);
        // A reset too large to represent is treated like an unparseable one.
        let reset = header_i64(headers, RESET_HEADER).and_then(|seconds| {
            let anchor = headers
                .get(DATE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_http_date)
                .unwrap_or(now_ms);
            seconds.checked_mul(1_000)?.checked_add(anchor)
        });

        Self {
            limit,
            remaining,
            reset,
        }
    }

    /// Whether the response carried no rate limit information at all.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.remaining.is_none() && self.reset.is_none()
    }
}

/// The rate limit state of one API key.
///
/// Only header reports mutate it; the client never decrements `remaining`
/// locally.
#[derive(Debug)]
pub struct RateLimitState {
    data: Mutex<RateLimitData>,
}

impl RateLimitState {
    /// Create a state with every field unknown.
    pub fn new() -> Self {
        Self {
            data: Mutex::new(RateLimitData::UNKNOWN),
        }
    }

    /// Fold the rate limit headers of a response into the state.
    pub fn report(&self, headers: &HeaderMap) {
        self.apply(RateLimitHeaders::parse(headers));
    }

    /// Apply parsed values. Absent fields keep their previous value.
    pub fn apply(&self, update: RateLimitHeaders) {
        if update.is_empty() {
            return;
        }
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(limit) = update.limit {
            data.limit = limit;
        }
        if let Some(remaining) = update.remaining {
            data.remaining = remaining;
        }
        if let Some(reset) = update.reset {
            data.reset = reset;
        }
    }

    /// Read the current snapshot.
    pub fn read(&self) -> RateLimitData {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn millis_to_datetime(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
}

/// Parse an HTTP `Date` value into epoch millis.
///
/// Accepts IMF-fixdate as well as the obsolete RFC 850 and asctime forms.
fn parse_http_date(value: &str) -> Option<i64> {
    let parsed = httpdate::parse_http_date(value.trim()).ok()?;
    let utc = OffsetDateTime::from(parsed);
    i64::try_from(utc.unix_timestamp_nanos() / 1_000_000).ok()
}
