//! Caching infrastructure for the service layer.
//!
//! [`CacheStore`] abstracts the external key-value store, [`cache_keys`]
//! derives stable keys from an operation and its arguments, and
//! [`Memoized`] combines the two into a cache-aside wrapper around any
//! async operation.

mod cache_interface;
pub mod cache_keys;
mod float_scan;
mod memoize;
pub mod metrics;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheStore};
pub use cache_keys::{derive_key, CacheKey, CacheKeyArgs, CallArgs, OperationIdentity};
pub use memoize::{CacheTtls, Memoized};
pub use redis_cache::RedisCacheService;

#[cfg(test)]
pub use cache_interface::MockCacheStore;
