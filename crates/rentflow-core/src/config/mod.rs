//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay, and
//! `RENTFLOW__`-prefixed environment variables.

pub mod app;
pub mod database;
pub mod integration;
pub mod logging;
pub mod plugin;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::integration::{
    AdTrackingConfig, EmailConfig, IntegrationsConfig, VendorConfig, WhatsAppConfig,
};
pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Vendor client settings.
    #[serde(default)]
    pub integrations: IntegrationsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables such as `RENTFLOW__PLUGINS__API_KEY`. Missing files are
    /// skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_with(env, Self::environment())
    }

    /// Environment source for `RENTFLOW__SECTION__KEY` variables. The
    /// `config` crate lowercases every key read from it.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("RENTFLOW")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(env: &str, environment: config::Environment) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
