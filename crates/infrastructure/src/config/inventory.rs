//! Inventory service configuration.

use serde::{Deserialize, Serialize};

/// Settings for the inventory-svc binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Delay applied to every reservation until changed at runtime
    #[serde(default = "default_artificial_delay")]
    pub artificial_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3002
}

const fn default_artificial_delay() -> u64 {
    500
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artificial_delay_ms: default_artificial_delay(),
        }
    }
}

impl InventoryConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
