//! Caching of whole fallback-level search results.
//!
//! One entry holds the food, cafe and activity listings a level returned for
//! a given set of queries. Smart and relaxed levels are cached with their own
//! lifetimes. The simple level is never cached: it asks for random ordering,
//! which is meant to differ between calls.

mod memory;
mod redis;

pub use memory::MemoryLevelCache;
pub use self::redis::RedisLevelCache;

use crate::services::course_builder::{FallbackLevel, FetchedListings, SearchQueries, SortMode};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Storage for level results, keyed by `level_cache_key`.
#[async_trait]
pub trait LevelCache: Send + Sync {
    async fn load(&self, key: &str) -> Option<FetchedListings>;
    async fn save(&self, key: &str, listings: &FetchedListings, ttl: Duration);
    async fn status(&self) -> CacheStatus;
    fn backend_name(&self) -> &'static str;
}

/// Entry lifetimes per fallback level. A zero lifetime turns caching off for
/// that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCachePolicy {
    pub smart_ttl_seconds: u64,
    pub relaxed_ttl_seconds: u64,
}

impl LevelCachePolicy {
    pub fn ttl_for(&self, level: FallbackLevel) -> Option<Duration> {
        let seconds = match level {
            FallbackLevel::Smart => self.smart_ttl_seconds,
            FallbackLevel::Relaxed => self.relaxed_ttl_seconds,
            FallbackLevel::Simple => 0,
        };
        (seconds > 0).then(|| Duration::from_secs(seconds))
    }
}

/// Cache key for one level's three searches, or `None` when the level's
/// results must not be reused. Whitespace inside queries is normalised.
pub fn level_cache_key(
    level: FallbackLevel,
    queries: &SearchQueries,
    count: u32,
) -> Option<String> {
    if level == FallbackLevel::Simple || queries.sort == SortMode::Random {
        return None;
    }

    let mut hasher = DefaultHasher::new();
    for query in [&queries.food, &queries.cafe, &queries.activity] {
        let words: Vec<&str> = query.split_whitespace().collect();
        words.join(" ").hash(&mut hasher);
    }
    queries.sort.as_param().hash(&mut hasher);
    count.hash(&mut hasher);

    Some(format!("course:level:{}:{:x}", level, hasher.finish()))
}

/// Health and usage of a level cache backend.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub healthy: bool,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    /// Only known for backends that own their storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
}

/// Lookup counters kept by the process, whatever the backend.
#[derive(Debug, Default)]
pub(crate) struct HitCounter {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HitCounter {
    pub(crate) fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn status(&self, healthy: bool, entries: Option<u64>) -> CacheStatus {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStatus {
            healthy,
            hits,
            misses,
            hit_rate,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(food: &str, sort: SortMode) -> SearchQueries {
        SearchQueries {
            food: food.to_string(),
            cafe: "성수동 카페".to_string(),
            activity: "성수동 가볼만한곳".to_string(),
            sort,
        }
    }

    #[test]
    fn test_level_cache_key_is_stable_and_tagged_by_level() {
        let q = queries("성수동 맛집", SortMode::Similarity);
        let smart = level_cache_key(FallbackLevel::Smart, &q, 10).unwrap();

        assert_eq!(Some(smart.clone()), level_cache_key(FallbackLevel::Smart, &q, 10));
        assert!(smart.starts_with("course:level:smart:"));
        assert!(level_cache_key(FallbackLevel::Relaxed, &q, 10)
            .unwrap()
            .starts_with("course:level:relaxed:"));
    }

    #[test]
    fn test_level_cache_key_ignores_extra_whitespace() {
        let spaced = queries(" 성수동  맛집 ", SortMode::Similarity);
        let tidy = queries("성수동 맛집", SortMode::Similarity);
        assert_eq!(
            level_cache_key(FallbackLevel::Smart, &spaced, 10),
            level_cache_key(FallbackLevel::Smart, &tidy, 10)
        );
    }

    #[test]
    fn test_level_cache_key_varies_with_queries_sort_and_count() {
        let base = level_cache_key(FallbackLevel::Smart, &queries("성수동 맛집", SortMode::Similarity), 10);
        assert_ne!(base, level_cache_key(FallbackLevel::Smart, &queries("성수동 맛집", SortMode::Comment), 10));
        assert_ne!(base, level_cache_key(FallbackLevel::Smart, &queries("성수동 맛집", SortMode::Similarity), 5));
        assert_ne!(base, level_cache_key(FallbackLevel::Smart, &queries("연남동 맛집", SortMode::Similarity), 10));
    }

    #[test]
    fn test_simple_level_and_random_sort_have_no_key() {
        let q = queries("성수동 맛집", SortMode::Similarity);
        assert!(level_cache_key(FallbackLevel::Simple, &q, 5).is_none());

        let random = queries("성수동 맛집", SortMode::Random);
        assert!(level_cache_key(FallbackLevel::Smart, &random, 10).is_none());
    }

    #[test]
    fn test_policy_ttl_per_level() {
        let policy = LevelCachePolicy {
            smart_ttl_seconds: 3600,
            relaxed_ttl_seconds: 0,
        };
        assert_eq!(policy.ttl_for(FallbackLevel::Smart), Some(Duration::from_secs(3600)));
        assert_eq!(policy.ttl_for(FallbackLevel::Relaxed), None);
        assert_eq!(policy.ttl_for(FallbackLevel::Simple), None);
    }

    #[test]
    fn test_hit_counter_status() {
        let counter = HitCounter::default();
        counter.record(false);
        counter.record(true);
        counter.record(true);

        let status = counter.status(true, Some(4));
        assert_eq!(status.hits, 2);
        assert_eq!(status.misses, 1);
        assert!((status.hit_rate - 66.666).abs() < 1.0);
        assert_eq!(status.entries, Some(4));
    }
}
