//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `downstream`: where the storefront finds inventory-svc
//! - `chaos`: fault injection settings
//! - `inventory`: settings for the inventory-svc binary
//!
//! Telemetry settings live next to their initialization in
//! [`crate::telemetry::TelemetryConfig`].

mod chaos;
mod downstream;
mod inventory;
mod server;

use serde::{Deserialize, Serialize};

pub use chaos::ChaosConfig;
pub use downstream::DownstreamConfig;
pub use inventory::InventoryConfig;
pub use server::{LogFormat, ServerConfig};

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix, e.g. `TECHMART_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TECHMART";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Downstream service locations
    #[serde(default)]
    pub downstream: DownstreamConfig,

    /// Fault injection configuration
    #[serde(default)]
    pub chaos: ChaosConfig,

    /// Inventory service configuration
    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources, lowest precedence first: built-in defaults, `config.toml`
    /// in the working directory, then `TECHMART_*` variables. Nested keys
    /// are separated by a double underscore so field names may contain
    /// single ones (`TECHMART_DOWNSTREAM__INVENTORY_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
    }
}
