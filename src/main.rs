//! RentFlow Server: car-rental booking and lead backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use rentflow_core::config::AppConfig;
use rentflow_core::error::AppError;
use rentflow_plugin::PluginManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `RENTFLOW_ENV` overlay and
/// `RENTFLOW__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("RENTFLOW_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RentFlow v{}", env!("CARGO_PKG_VERSION"));

    if config.plugins.api_key.is_empty() {
        tracing::warn!("plugins.api_key is empty; plugin endpoints will reject every request");
    }

    let store = rentflow_database::open_store(&config.database).await?;
    let vendors = rentflow_integrations::VendorClients::from_config(&config.integrations)?;

    let plugins = Arc::new(PluginManager::new());
    rentflow_integrations::register_builtin_plugins(&plugins, &config.plugins).await;
    tracing::info!(
        active = ?plugins.active_plugins().await,
        "Plugin system ready"
    );

    let state = rentflow_api::AppState::new(config, store, plugins, vendors);
    rentflow_api::run_server(state).await
}
