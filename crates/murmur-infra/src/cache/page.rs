//! Single-slot cache for the rendered index listing.

use std::sync::Arc;
use std::time::Duration;

use murmur_core::ports::{Cache, CacheError};

const INDEX_SLOT: &str = "page:index";

/// Time-bounded cache of one rendered page.
///
/// Holds the serialized index listing until the TTL runs out or
/// `clear` is called. Writes elsewhere in the system never invalidate
/// it; staleness up to the TTL is accepted. Concurrent refreshes may
/// race, which is fine - every stored rendering is at most TTL old.
pub struct PageCache {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// The cached rendering, if still fresh.
    pub async fn get(&self) -> Option<String> {
        self.cache.get(INDEX_SLOT).await
    }

    /// Store a fresh rendering with a full TTL.
    pub async fn put(&self, rendered: &str) -> Result<(), CacheError> {
        self.cache.set(INDEX_SLOT, rendered, Some(self.ttl)).await
    }

    /// Forcibly evict the slot.
    pub async fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(INDEX_SLOT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::clock::ManualClock;
    use chrono::Utc;

    fn page_cache() -> (Arc<ManualClock>, PageCache) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = Arc::new(InMemoryCache::new(clock.clone()));
        (clock, PageCache::new(cache, Duration::from_secs(20)))
    }

    #[tokio::test]
    async fn test_serves_identical_bytes_until_expiry() {
        let (clock, pages) = page_cache();

        pages.put("listing-v1").await.unwrap();
        let first = pages.get().await.unwrap();

        // The underlying data may change; the slot must not notice.
        clock.advance(chrono::Duration::seconds(19));
        let second = pages.get().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_expires_after_ttl() {
        let (clock, pages) = page_cache();

        pages.put("listing-v1").await.unwrap();
        clock.advance(chrono::Duration::seconds(21));
        assert_eq!(pages.get().await, None);
    }

    #[tokio::test]
    async fn test_clear_evicts_immediately() {
        let (_clock, pages) = page_cache();

        pages.put("listing-v1").await.unwrap();
        pages.clear().await.unwrap();
        assert_eq!(pages.get().await, None);
    }
}
