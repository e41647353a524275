//! Time-based freshness window for remote responses.
//!
//! Successful bodies are kept for `ttl` and served instead of a live fetch.
//! Failures are never stored.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

pub struct FreshnessCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (Instant, String)>>,
}

impl FreshnessCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached body for `key`, if it is younger than the window.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, body)| body.clone())
    }

    pub async fn insert(&self, key: String, body: String) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (Instant::now(), body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_entry_is_served() {
        let cache = FreshnessCache::new(Duration::from_secs(60));
        cache.insert("k".into(), "body".into()).await;

        assert_eq!(cache.get("k").await.as_deref(), Some("body"));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn test_zero_window_disables_cache() {
        let cache = FreshnessCache::new(Duration::ZERO);
        cache.insert("k".into(), "body".into()).await;

        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_stale_entry_expires() {
        let cache = FreshnessCache::new(Duration::from_millis(10));
        cache.insert("k".into(), "body".into()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("k").await, None);
    }
}
