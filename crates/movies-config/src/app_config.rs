//! Application configuration structures.

use movies_core::telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache expiry configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Search backend configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging and metrics configuration.
    #[serde(default)]
    pub observability: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "movies".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Cache backends the service knows how to talk to.
pub const SUPPORTED_CACHE_BACKENDS: &[&str] = &["redis"];

/// Cache expiry configuration.
///
/// Two tiers: the standard TTL for domain lookups and a low TTL for cached
/// query fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache backend type.
    pub backend_type: String,
    /// Standard expiry in seconds.
    pub expire_in_second: u64,
    /// Low expiry in seconds.
    pub expire_low_in_second: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend_type: "redis".to_string(),
            expire_in_second: 180,
            expire_low_in_second: 30,
        }
    }
}

impl CacheConfig {
    /// Returns the standard TTL as a Duration.
    #[must_use]
    pub const fn standard_ttl(&self) -> Duration {
        Duration::from_secs(self.expire_in_second)
    }

    /// Returns the low TTL as a Duration.
    #[must_use]
    pub const fn low_ttl(&self) -> Duration {
        Duration::from_secs(self.expire_low_in_second)
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Enable Redis (can be disabled for local development).
    pub enabled: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://redis:6379".to_string(),
            pool_size: 10,
            enabled: true,
        }
    }
}

/// Search backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Elasticsearch node.
    pub url: String,
    /// Index holding film documents.
    pub films_index: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "http://elasticsearch:9200".to_string(),
            films_index: "movies".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        let cache = CacheConfig::default();
        assert_eq!(cache.backend_type, "redis");
        assert_eq!(cache.standard_ttl(), Duration::from_secs(180));
        assert_eq!(cache.low_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn test_search_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.films_index, "movies");
        assert_eq!(search.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_section_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"app":{"name":"films","version":"1","environment":"test"}}"#).unwrap();
        assert_eq!(config.app.name, "films");
        assert_eq!(config.cache.expire_in_second, 180);
        assert!(config.redis.enabled);
    }
}
