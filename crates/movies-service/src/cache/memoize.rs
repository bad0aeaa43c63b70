//! Cache-aside memoization of async operations.

use super::metrics::CacheMetrics;
use super::{derive_key, CacheExt, CacheKeyArgs, CacheStore, OperationIdentity};
use movies_config::CacheConfig;
use movies_core::{BoxFuture, MoviesResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// The two expiry tiers handed to memoized operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// TTL for domain lookups.
    pub standard: Duration,
    /// TTL for cached query fragments.
    pub low: Duration,
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            standard: config.standard_ttl(),
            low: config.low_ttl(),
        }
    }
}

type Operation<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, O> + Send + Sync>;

/// An async operation wrapped with a cache-aside lookup.
///
/// Each call derives a key from the operation identity and the input, reads
/// the store, and only runs the operation on a miss, writing the result back
/// with the configured TTL.
///
/// The store is best-effort: a failed read is treated as a miss, and a failed
/// write is logged while the freshly computed value is still returned. Errors
/// from the operation itself are returned as-is and never cached. Concurrent
/// misses on one key are not deduplicated; the last write wins.
pub struct Memoized<I, O> {
    identity: OperationIdentity,
    ttl: Duration,
    cache: Arc<dyn CacheStore>,
    operation: Operation<I, O>,
}

impl<I, O> Memoized<I, O>
where
    I: CacheKeyArgs + Send + 'static,
    O: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Wraps `operation`, caching its results for `ttl`.
    pub fn new<F>(identity: OperationIdentity, ttl: Duration, cache: Arc<dyn CacheStore>, operation: F) -> Self
    where
        F: Fn(I) -> BoxFuture<'static, O> + Send + Sync + 'static,
    {
        Self {
            identity,
            ttl,
            cache,
            operation: Arc::new(operation),
        }
    }

    /// Returns the identity this wrapper derives keys from.
    #[must_use]
    pub fn identity(&self) -> &OperationIdentity {
        &self.identity
    }

    /// Returns the TTL written with each cached value.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Invokes the operation through the cache.
    pub async fn call(&self, input: I) -> MoviesResult<O> {
        let operation = self.identity.name();

        let key = match input.key_args() {
            Ok(args) => derive_key(&self.identity, &args),
            Err(e) => {
                error!("Cannot derive cache key for '{}', bypassing cache: {}", operation, e);
                CacheMetrics::error(operation);
                return (self.operation)(input).await;
            }
        };

        match self.cache.get::<O>(key.as_str()).await {
            Ok(Some(value)) => {
                debug!("Cache hit for '{}'", key);
                CacheMetrics::hit(operation);
                return Ok(value);
            }
            Ok(None) => {
                debug!("Cache miss for '{}'", key);
                CacheMetrics::miss(operation);
            }
            Err(e) => {
                warn!("Cache read failed for '{}', treating as miss: {}", key, e);
                CacheMetrics::error(operation);
            }
        }

        let value = (self.operation)(input).await?;

        match serde_json::to_string(&value) {
            Ok(json) => {
                if let Err(e) = self.cache.set_raw(key.as_str(), &json, self.ttl).await {
                    warn!("Cache write failed for '{}': {}", key, e);
                    CacheMetrics::error(operation);
                }
            }
            Err(e) => {
                error!("Result of '{}' is not serializable, not cached: {}", operation, e);
                CacheMetrics::error(operation);
            }
        }

        Ok(value)
    }
}

impl<I, O> Clone for Memoized<I, O> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            ttl: self.ttl,
            cache: Arc::clone(&self.cache),
            operation: Arc::clone(&self.operation),
        }
    }
}

impl<I, O> fmt::Debug for Memoized<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("identity", &self.identity)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
