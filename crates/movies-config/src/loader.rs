//! Configuration loader with layered sources.

use crate::{AppConfig, SUPPORTED_CACHE_BACKENDS};
use config::{Config, ConfigError, Environment, File};
use movies_core::MoviesError;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `MOVIES_` prefix
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, MoviesError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, MoviesError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, MoviesError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("MOVIES_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("MOVIES")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_movies_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_movies_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), MoviesError> {
    if !SUPPORTED_CACHE_BACKENDS.contains(&config.cache.backend_type.as_str()) {
        return Err(MoviesError::Configuration(format!(
            "Unknown backend type: {}",
            config.cache.backend_type
        )));
    }

    if config.cache.expire_in_second == 0 || config.cache.expire_low_in_second == 0 {
        return Err(MoviesError::Configuration(
            "Cache expiry must be at least one second".to_string(),
        ));
    }

    if config.redis.enabled {
        check_url("redis", &config.redis.url)?;
    }

    check_url("search", &config.search.url)?;

    if config.search.films_index.trim().is_empty() {
        return Err(MoviesError::Configuration("Films index name is required".to_string()));
    }

    Ok(())
}

fn check_url(name: &str, value: &str) -> Result<(), MoviesError> {
    if value.is_empty() {
        return Err(MoviesError::Configuration(format!("{} URL is required", name)));
    }
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| MoviesError::Configuration(format!("Invalid {} URL '{}': {}", name, value, e)))
}

fn config_error_to_movies_error(err: ConfigError) -> MoviesError {
    MoviesError::Configuration(err.to_string())
}
