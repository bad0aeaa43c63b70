//! # Movies Server
//!
//! Loads configuration, initializes logging and metrics, assembles the
//! services and keeps them alive until a shutdown signal arrives.

use movies_config::ConfigLoader;
use movies_core::telemetry::init_telemetry;
use movies_core::MoviesResult;
use movies_server::di::AppContainer;
use movies_server::startup::{install_metrics_exporter, print_startup_info, shutdown_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("movies-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> MoviesResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get();

    init_telemetry(&config.observability)?;

    info!("Starting movies server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    install_metrics_exporter(&config.observability)?;

    let container = AppContainer::build(config).await?;
    print_startup_info(config);

    shutdown_signal().await;

    container.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}
