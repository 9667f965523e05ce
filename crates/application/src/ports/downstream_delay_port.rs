//! Downstream delay port
//!
//! Relays reads and writes of one downstream collaborator's artificial delay.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A downstream answer relayed verbatim to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayedResponse {
    /// HTTP status returned by the collaborator
    pub status: u16,
    /// JSON body returned by the collaborator
    pub body: serde_json::Value,
}

/// Port for the downstream collaborator's delay-configuration endpoint
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DownstreamDelayPort: Send + Sync {
    /// Read the collaborator's current delay
    async fn current_delay(&self) -> Result<RelayedResponse, ApplicationError>;

    /// Replace the collaborator's delay
    ///
    /// The value has already been validated as a non-negative number and is
    /// sent unchanged.
    async fn update_delay(
        &self,
        delay_ms: serde_json::Number,
    ) -> Result<RelayedResponse, ApplicationError>;
}
