//! Redis-based cache implementation.

use super::CacheStore;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use movies_config::RedisConfig;
use movies_core::{MoviesError, MoviesResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache store.
#[derive(Clone)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    ///
    /// Every read misses and every write is dropped.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Builds the connection pool from configuration.
    ///
    /// No connection is opened here; the pool connects lazily.
    pub fn from_config(config: &RedisConfig) -> MoviesResult<Self> {
        if !config.enabled {
            info!("Redis cache disabled by configuration");
            return Ok(Self::disabled());
        }

        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| MoviesError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| MoviesError::cache(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> MoviesResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| MoviesError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(MoviesError::cache("Cache is disabled")),
        }
    }
}

#[async_trait]
impl CacheStore for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> MoviesResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| MoviesError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> MoviesResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| MoviesError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn health_check(&self) -> MoviesResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| MoviesError::cache(format!("Redis PING failed: {}", e)))?;

        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            info!("Redis pool closed");
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_misses_and_drops_writes() {
        let cache = RedisCacheService::disabled();
        cache.set_raw("k", "v", Duration::from_secs(5)).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        assert!(cache.health_check().await.is_ok());
    }

    #[test]
    fn test_from_config_respects_enabled_flag() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::from_config(&config).unwrap();
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_from_config_builds_lazy_pool() {
        // Building the pool does not connect, so an unreachable host is fine.
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 2,
            enabled: true,
        };
        let cache = RedisCacheService::from_config(&config).unwrap();
        assert!(cache.is_enabled());
    }
}
