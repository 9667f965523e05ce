//! Downstream service locations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::PropagatingClientConfig;

/// Where the storefront reaches its collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownstreamConfig {
    /// Base URL of inventory-svc
    #[serde(default = "default_inventory_url")]
    pub inventory_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_inventory_url() -> String {
    "http://inventory-svc:3002".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_connect_timeout() -> u64 {
    2
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            inventory_url: default_inventory_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl DownstreamConfig {
    /// HTTP client settings for downstream calls
    pub fn client_config(&self) -> PropagatingClientConfig {
        PropagatingClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}
