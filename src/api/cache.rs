//! In-memory TTL cache for computed responses.
//!
//! Keys are built from request parameters (`team:{id}`, `player:{id}:{name}`,
//! `compare:{a}:{b}`, `predict:...`). Only successful responses are stored.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry {
    stored_at: Instant,
    value: Value,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// A zero TTL disables caching entirely.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Value> {
        if !self.is_enabled() {
            return None;
        }

        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            debug!("Cache hit for {}", key);
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, key: String, value: Value) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("team:57".to_string(), json!({"teamId": 57})).await;

        assert_eq!(cache.get("team:57").await, Some(json!({"teamId": 57})));
        assert_eq!(cache.get("team:61").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_stores_nothing() {
        let cache = ResponseCache::disabled();
        assert!(!cache.is_enabled());

        cache.insert("team:57".to_string(), json!(1)).await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("team:57").await, None);
    }

    #[tokio::test]
    async fn test_expired_entries() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.insert("team:57".to_string(), json!(1)).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get("team:57").await, None);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }
}
