use crate::cache::{CacheStatus, HitCounter, LevelCache};
use crate::error::{AppError, Result};
use crate::services::course_builder::FetchedListings;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

/// Level cache shared through Redis. Entries are JSON with a server-side
/// expiry; hit counters are per process.
pub struct RedisLevelCache {
    connection: ConnectionManager,
    counter: HitCounter,
}

impl RedisLevelCache {
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Cache(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(RedisLevelCache {
            connection,
            counter: HitCounter::default(),
        })
    }
}

/// Redis expiries are whole seconds and must be positive.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl LevelCache for RedisLevelCache {
    async fn load(&self, key: &str) -> Option<FetchedListings> {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<Option<String>> = conn.get(key).await;

        let cached = match result {
            Ok(Some(json)) => match serde_json::from_str::<FetchedListings>(&json) {
                Ok(listings) => Some(listings),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable cached level");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Redis error loading level");
                None
            }
        };

        self.counter.record(cached.is_some());
        tracing::debug!(key = %key, hit = cached.is_some(), "Redis level cache lookup");
        cached
    }

    async fn save(&self, key: &str, listings: &FetchedListings, ttl: Duration) {
        let json = match serde_json::to_string(listings) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize level for cache");
                return;
            }
        };

        let mut conn = self.connection.clone();
        let result: redis::RedisResult<()> = conn.set_ex(key, json, expiry_seconds(ttl)).await;

        match result {
            Ok(()) => tracing::debug!(
                key = %key,
                total = listings.total(),
                ttl_secs = expiry_seconds(ttl),
                "Redis cached level"
            ),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to cache level"),
        }
    }

    async fn status(&self) -> CacheStatus {
        let mut conn = self.connection.clone();
        let ping: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        self.counter.status(ping.is_ok(), None)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawListing;

    #[test]
    fn test_expiry_seconds_rounds_up_to_one() {
        assert_eq!(expiry_seconds(Duration::from_millis(300)), 1);
        assert_eq!(expiry_seconds(Duration::from_secs(600)), 600);
    }

    #[tokio::test]
    #[ignore] // Requires a running Redis
    async fn test_redis_round_trips_level() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".into());
        let cache = RedisLevelCache::new(&url).await.unwrap();

        let level = FetchedListings {
            food: vec![RawListing {
                title: "테스트 식당".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        cache
            .save("course:level:smart:test", &level, Duration::from_secs(30))
            .await;

        let cached = cache.load("course:level:smart:test").await.unwrap();
        assert_eq!(cached, level);

        let status = cache.status().await;
        assert!(status.healthy);
        assert_eq!(status.hits, 1);
        assert!(status.entries.is_none());
    }
}
