//! Remote delay proxy - relays delay reads and writes to inventory-svc

use application::error::ApplicationError;
use application::ports::{DownstreamDelayPort, RelayedResponse};
use async_trait::async_trait;
use reqwest::Response;
use serde_json::json;
use tracing::{instrument, warn};

use super::{INVENTORY_SERVICE, join_url, unreachable};
use crate::http::PropagatingHttpClient;

/// Relays the inventory service's `/admin/delay` endpoint verbatim
#[derive(Debug, Clone)]
pub struct HttpDownstreamDelayAdapter {
    client: PropagatingHttpClient,
    endpoint: String,
}

impl HttpDownstreamDelayAdapter {
    /// Create an adapter for the service at `base_url`
    pub fn new(client: PropagatingHttpClient, base_url: &str) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "/admin/delay"),
        }
    }

    /// Endpoint every call is relayed to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn relay(response: Response) -> Result<RelayedResponse, ApplicationError> {
        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await.map_err(|e| {
            warn!(status, error = %e, "Downstream answered with a non-JSON body");
            ApplicationError::BadUpstreamResponse {
                service: INVENTORY_SERVICE.to_string(),
            }
        })?;
        Ok(RelayedResponse { status, body })
    }
}

#[async_trait]
impl DownstreamDelayPort for HttpDownstreamDelayAdapter {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn current_delay(&self) -> Result<RelayedResponse, ApplicationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| unreachable(INVENTORY_SERVICE, &e))?;
        Self::relay(response).await
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn update_delay(
        &self,
        delay_ms: serde_json::Number,
    ) -> Result<RelayedResponse, ApplicationError> {
        let response = self
            .client
            .put(&self.endpoint)
            .json(&json!({ "delayMs": delay_ms }))
            .send()
            .await
            .map_err(|e| unreachable(INVENTORY_SERVICE, &e))?;
        Self::relay(response).await
    }
}
