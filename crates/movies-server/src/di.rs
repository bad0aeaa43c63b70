//! Application assembly.
//!
//! [`AppContainer`] owns the long-lived clients and hands them to the
//! services that need them:
//!
//! ```text
//! AppContainer
//!   ├── cache:  Arc<dyn CacheStore>     (Redis, or disabled)
//!   ├── search: Arc<dyn SearchBackend>  (Elasticsearch)
//!   └── film_service: Arc<dyn FilmService>
//!         └── FilmServiceImpl(search, cache, films_index, ttls)
//! ```

use movies_config::{validate_config, AppConfig};
use movies_core::MoviesResult;
use movies_search::{ElasticSearchBackend, SearchBackend};
use movies_service::{CacheStore, CacheTtls, FilmService, FilmServiceImpl, RedisCacheService};
use std::sync::Arc;
use tracing::{info, warn};

/// Reachability of the external stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the cache store answers. Always true for a disabled cache.
    pub cache: bool,
    /// Whether the search backend answers.
    pub search: bool,
}

impl HealthStatus {
    /// Returns true when both stores answer.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.cache && self.search
    }
}

/// Application container holding the assembled components.
pub struct AppContainer {
    cache: Arc<dyn CacheStore>,
    search: Arc<dyn SearchBackend>,
    film_service: Arc<dyn FilmService>,
}

impl AppContainer {
    /// Builds every component from configuration.
    ///
    /// An unreachable cache is logged and tolerated since every cached call
    /// degrades to a miss. An unreachable search backend fails the build.
    pub async fn build(config: &AppConfig) -> MoviesResult<Self> {
        validate_config(config)?;

        let cache = RedisCacheService::from_config(&config.redis)?;
        if let Err(e) = cache.health_check().await {
            warn!("Redis is not reachable, continuing with a degraded cache: {}", e);
        }

        let search = ElasticSearchBackend::connect(&config.search).await?;

        Ok(Self::from_parts(config, Arc::new(cache), Arc::new(search)))
    }

    /// Wires the services around already constructed clients.
    pub fn from_parts(config: &AppConfig, cache: Arc<dyn CacheStore>, search: Arc<dyn SearchBackend>) -> Self {
        let film_service = FilmServiceImpl::new(
            Arc::clone(&search),
            Arc::clone(&cache),
            config.search.films_index.clone(),
            CacheTtls::from(&config.cache),
        );

        info!(
            "Film service assembled on index '{}' (cache {})",
            config.search.films_index,
            if cache.is_enabled() { "enabled" } else { "disabled" }
        );

        Self {
            cache,
            search,
            film_service: Arc::new(film_service),
        }
    }

    /// Returns the film service.
    #[must_use]
    pub fn film_service(&self) -> Arc<dyn FilmService> {
        Arc::clone(&self.film_service)
    }

    /// Returns the cache store.
    #[must_use]
    pub fn cache(&self) -> Arc<dyn CacheStore> {
        Arc::clone(&self.cache)
    }

    /// Checks both external stores.
    pub async fn health_check(&self) -> HealthStatus {
        let cache = match self.cache.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Cache health check failed: {}", e);
                false
            }
        };
        let search = match self.search.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Search backend health check failed: {}", e);
                false
            }
        };
        HealthStatus { cache, search }
    }

    /// Closes the clients.
    pub async fn shutdown(&self) {
        info!("Shutting down application container...");
        self.cache.close().await;
        self.search.close().await;
        info!("Application container shut down");
    }
}

impl std::fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContainer")
            .field("cache_enabled", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}
