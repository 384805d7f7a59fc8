//! In-memory cache implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use murmur_core::ports::{Cache, CacheError, Clock};

struct CacheEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory cache using a simple HashMap with async RwLock.
///
/// Expiry is measured against an injected clock, so TTL behavior can
/// be driven deterministically from tests. Data is lost on process
/// restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            clock,
        }
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| self.clock.now() > exp)
            .unwrap_or(false)
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if self.is_expired(entry) {
            drop(store);
            // Clean up the expired entry with a write lock
            let mut store = self.store.write().await;
            store.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self.store.write().await;

        let expires_at = ttl.and_then(|d| {
            chrono::Duration::from_std(d)
                .ok()
                .map(|d| self.clock.now() + d)
        });

        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new(Arc::new(SystemClock));
        cache.set("key1", "value1", None).await.unwrap();
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new(Arc::new(SystemClock));
        cache.set("key1", "value1", None).await.unwrap();
        cache.delete("key1").await.unwrap();
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_with_the_clock() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = InMemoryCache::new(clock.clone());

        cache
            .set("key1", "value1", Some(Duration::from_secs(20)))
            .await
            .unwrap();
        assert!(cache.exists("key1").await);

        clock.advance(chrono::Duration::seconds(21));
        assert_eq!(cache.get("key1").await, None);
    }
}
