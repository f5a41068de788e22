use crate::cache::{CacheStatus, HitCounter, LevelCache};
use crate::services::course_builder::FetchedListings;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CachedLevel {
    listings: Arc<FetchedListings>,
    ttl: Duration,
}

/// Each entry lives for the lifetime it was saved with.
struct PerLevelExpiry;

impl Expiry<String, CachedLevel> for PerLevelExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedLevel,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local level cache on moka, bounded by entry count.
pub struct MemoryLevelCache {
    levels: Cache<String, CachedLevel>,
    counter: HitCounter,
}

impl MemoryLevelCache {
    pub fn new(max_entries: u64) -> Self {
        let levels = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerLevelExpiry)
            .build();

        MemoryLevelCache {
            levels,
            counter: HitCounter::default(),
        }
    }
}

#[async_trait]
impl LevelCache for MemoryLevelCache {
    async fn load(&self, key: &str) -> Option<FetchedListings> {
        let cached = self.levels.get(key).await;
        self.counter.record(cached.is_some());
        tracing::debug!(key = %key, hit = cached.is_some(), "Memory level cache lookup");
        cached.map(|entry| (*entry.listings).clone())
    }

    async fn save(&self, key: &str, listings: &FetchedListings, ttl: Duration) {
        let entry = CachedLevel {
            listings: Arc::new(listings.clone()),
            ttl,
        };
        self.levels.insert(key.to_string(), entry).await;
        tracing::debug!(key = %key, total = listings.total(), ttl_secs = ttl.as_secs(), "Memory cached level");
    }

    async fn status(&self) -> CacheStatus {
        self.counter.status(true, Some(self.levels.entry_count()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
