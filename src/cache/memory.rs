//! In-process response cache with an optional time-to-live.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use hypixel_api_client::cache::MemoryCache;
//!
//! let cache = MemoryCache::with_ttl(Duration::from_secs(60));
//! assert!(cache.is_empty());
//! assert_eq!(cache.ttl(), Some(Duration::from_secs(60)));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures_util::future::{self, BoxFuture};

use crate::cache::ResponseCache;
use crate::error::HypixelError;
use crate::types::Envelope;

/// A [`ResponseCache`] keeping envelopes in memory.
///
/// Without a TTL entries live until removed. With one, expired entries are
/// treated as absent and dropped by [`cleanup`](Self::cleanup) or when read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Envelope, Instant)>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// Create a cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries expire `ttl` after being stored.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Get a stored envelope if it exists and hasn't expired.
    pub fn get_entry(&self, key: &str) -> Option<Envelope> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((value, stored_at)) if self.is_live(*stored_at) => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store an envelope, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, value: Envelope) {
        self.lock().insert(key.into(), (value, Instant::now()));
    }

    /// Remove an entry. Returns the envelope if it hadn't expired.
    pub fn remove(&self, key: &str) -> Option<Envelope> {
        self.lock()
            .remove(key)
            .and_then(|(value, stored_at)| self.is_live(stored_at).then_some(value))
    }

    /// Check if a key exists and hasn't expired.
    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|(_, stored_at)| self.is_live(*stored_at))
    }

    /// Remove all expired entries.
    pub fn cleanup(&self) {
        let Some(ttl) = self.ttl else {
            return;
        };
        self.lock()
            .retain(|_, (_, stored_at)| stored_at.elapsed() < ttl);
    }

    /// Number of entries, expired ones included until cleaned up.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn is_live(&self, stored_at: Instant) -> bool {
        self.ttl.is_none_or(|ttl| stored_at.elapsed() < ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Envelope, Instant)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResponseCache for MemoryCache {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Envelope>, HypixelError>> {
        Box::pin(future::ready(Ok(self.get_entry(key))))
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a Envelope) -> BoxFuture<'a, Result<(), HypixelError>> {
        self.insert(key, value.clone());
        Box::pin(future::ready(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    fn envelope() -> Envelope {
        serde_json::from_value(json!({"success": true, "products": {}})).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let cache = MemoryCache::new();
        cache.insert("skyblock:bazaar", envelope());
        assert_eq!(cache.get_entry("skyblock:bazaar"), Some(envelope()));
        assert_eq!(cache.get_entry("boosters"), None);
        assert!(cache.contains("skyblock:bazaar"));
    }

    #[test]
    fn test_remove() {
        let cache = MemoryCache::new();
        cache.insert("key", envelope());
        assert_eq!(cache.remove("key"), Some(envelope()));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expiration() {
        let cache = MemoryCache::with_ttl(Duration::from_millis(50));
        cache.insert("key", envelope());
        assert!(cache.contains("key"));

        thread::sleep(Duration::from_millis(60));
        assert!(!cache.contains("key"));
        assert_eq!(cache.get_entry("key"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cleanup() {
        let cache = MemoryCache::with_ttl(Duration::from_millis(50));
        cache.insert("key1", envelope());
        cache.insert("key2", envelope());

        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.len(), 2);

        cache.cleanup();
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_trait_round_trip() {
        let cache = MemoryCache::new();
        let value = envelope();
        ResponseCache::set(&cache, "k", &value).await.unwrap();
        let stored = ResponseCache::get(&cache, "k").await.unwrap();
        assert_eq!(stored, Some(value));
    }
}
