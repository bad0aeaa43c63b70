//! Server startup utilities.

use metrics_exporter_prometheus::PrometheusBuilder;
use movies_config::AppConfig;
use movies_core::telemetry::TelemetryConfig;
use movies_core::{MoviesError, MoviesResult};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

/// Installs the Prometheus recorder and its scrape endpoint.
///
/// Does nothing when metrics are disabled; the cache counters then stay
/// no-ops.
pub fn install_metrics_exporter(config: &TelemetryConfig) -> MoviesResult<()> {
    if !config.metrics_enabled {
        info!("Metrics disabled");
        return Ok(());
    }

    let addr: SocketAddr = config
        .metrics_addr
        .parse()
        .map_err(|e| MoviesError::Configuration(format!("Invalid metrics address '{}': {}", config.metrics_addr, e)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MoviesError::internal(format!("Failed to install metrics exporter: {}", e)))?;

    movies_service::cache::metrics::register_metrics();
    info!("Metrics exported on http://{}/metrics", addr);
    Ok(())
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Service:       {} v{} ({})", config.app.name, config.app.version, config.app.environment);
    info!("Search:        {} (index '{}')", config.search.url, config.search.films_index);
    if config.redis.enabled {
        info!("Cache:         {}", config.redis.url);
    } else {
        info!("Cache:         disabled");
    }
    info!(
        "Cache TTL:     {}s lookups, {}s query fragments",
        config.cache.expire_in_second, config.cache.expire_low_in_second
    );
    info!("{}", separator);
}

/// Completes on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_startup_info_does_not_panic() {
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_metrics_disabled_is_noop() {
        let config = TelemetryConfig {
            metrics_enabled: false,
            metrics_addr: "not an address".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(install_metrics_exporter(&config).is_ok());
    }

    #[test]
    fn test_invalid_metrics_address_rejected() {
        let config = TelemetryConfig {
            metrics_addr: "not an address".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            install_metrics_exporter(&config),
            Err(MoviesError::Configuration(_))
        ));
    }
}
