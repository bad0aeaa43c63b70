//! Cache store trait for abstracted caching operations.

use async_trait::async_trait;
use movies_core::MoviesResult;
use std::time::Duration;

/// Key-value store holding serialized values with a time-to-live.
///
/// Values are JSON strings so the trait stays dyn-compatible. Expiry is
/// owned by the store: an expired key simply reads back as `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> MoviesResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> MoviesResult<()>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> MoviesResult<()>;

    /// Releases the store's connections.
    async fn close(&self);

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed value from the cache.
    ///
    /// An empty stored string counts as absent.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> MoviesResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) if !json.is_empty() => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> MoviesResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use movies_core::MoviesError;

    #[tokio::test]
    async fn test_get_deserializes_value() {
        let mut store = MockCacheStore::new();
        store
            .expect_get_raw()
            .returning(|_| Ok(Some(r#"{"sort":[{"title.raw":"asc"}]}"#.to_string())));

        let value: Option<serde_json::Value> = store.get("k").await.unwrap();
        assert_eq!(value.unwrap()["sort"][0]["title.raw"], "asc");
    }

    #[tokio::test]
    async fn test_empty_string_is_a_miss() {
        let mut store = MockCacheStore::new();
        store.expect_get_raw().returning(|_| Ok(Some(String::new())));

        let value: Option<Vec<u32>> = store.get("k").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_serialization_error() {
        let mut store = MockCacheStore::new();
        store.expect_get_raw().returning(|_| Ok(Some("{not json".to_string())));

        let result: MoviesResult<Option<Vec<u32>>> = store.get("k").await;
        assert!(matches!(result, Err(MoviesError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_set_serializes_value() {
        let mut store = MockCacheStore::new();
        store
            .expect_set_raw()
            .withf(|key, value, ttl| key == "k" && value == "[1,2]" && *ttl == Duration::from_secs(30))
            .times(1)
            .returning(|_, _, _| Ok(()));

        store.set("k", &vec![1, 2], Duration::from_secs(30)).await.unwrap();
    }
}
