//! Metadata attached to API responses by the client.

use reqwest::header::{AGE, CACHE_CONTROL, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitData;

/// Header carrying Cloudflare's cache verdict.
pub const CF_CACHE_STATUS_HEADER: &str = "cf-cache-status";

/// Non-domain metadata the client attaches to a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultMeta {
    /// `true` when the response was served by the configured cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    /// Rate limit snapshot, present on authenticated calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratelimit: Option<RateLimitData>,
    /// Cloudflare edge cache information, present when Cloudflare reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare_cache: Option<CloudflareCache>,
}

impl DefaultMeta {
    /// JSON keys owned by the metadata.
    pub const KEYS: [&'static str; 3] = ["cached", "ratelimit", "cloudflareCache"];

    /// Whether no metadata is set.
    pub fn is_empty(&self) -> bool {
        self.cached.is_none() && self.ratelimit.is_none() && self.cloudflare_cache.is_none()
    }
}

/// Cloudflare's cache status for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    /// Served from the edge cache.
    Hit,
    /// Not in the edge cache; fetched from origin.
    Miss,
    /// The origin asked Cloudflare not to cache.
    Bypass,
    /// Cached copy had expired; fetched from origin.
    Expired,
    /// Not eligible for caching.
    Dynamic,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl CacheStatus {
    /// Parse a `cf-cache-status` header value.
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIT" => CacheStatus::Hit,
            "MISS" => CacheStatus::Miss,
            "BYPASS" => CacheStatus::Bypass,
            "EXPIRED" => CacheStatus::Expired,
            "DYNAMIC" => CacheStatus::Dynamic,
            _ => CacheStatus::Unknown,
        }
    }
}

/// Cloudflare edge cache information for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudflareCache {
    /// Cloudflare cache status.
    pub status: CacheStatus,
    /// Cloudflare cache age in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u64>,
    /// Cloudflare max cache age in seconds (`s-maxage`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
}

impl CloudflareCache {
    /// Extract the edge cache descriptor from response headers.
    ///
    /// Returns `None` unless `cf-cache-status` is present. A `HIT` without an
    /// `age` header reports an age of zero; `max_age` is only set when
    /// `s-maxage` is positive.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let status = headers.get(CF_CACHE_STATUS_HEADER)?.to_str().ok()?;
        let status = CacheStatus::from_header(status);

        let age = headers
            .get(AGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or(if status == CacheStatus::Hit { Some(0) } else { None });

        let max_age = headers
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(s_maxage)
            .filter(|max_age| *max_age > 0);

        Some(Self {
            status,
            age,
            max_age,
        })
    }
}

fn s_maxage(cache_control: &str) -> Option<u64> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("s-maxage="))
        .find_map(|value| value.trim().parse::<u64>().ok())
}
