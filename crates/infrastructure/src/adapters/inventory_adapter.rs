//! Inventory adapter - reserves stock on inventory-svc

use application::error::ApplicationError;
use application::ports::{InventoryPort, Reservation, ReservationItem};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

use super::{INVENTORY_SERVICE, join_url, unreachable};
use crate::http::PropagatingHttpClient;

/// Calls `POST /reserve` on the inventory service
///
/// Requests go through the propagating client, so a reservation made inside
/// a journey scope carries that journey to inventory-svc.
#[derive(Debug, Clone)]
pub struct HttpInventoryAdapter {
    client: PropagatingHttpClient,
    endpoint: String,
}

impl HttpInventoryAdapter {
    /// Create an adapter for the service at `base_url`
    pub fn new(client: PropagatingHttpClient, base_url: &str) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "/reserve"),
        }
    }
}

#[async_trait]
impl InventoryPort for HttpInventoryAdapter {
    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn reserve(&self, items: &[ReservationItem]) -> Result<Reservation, ApplicationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "items": items }))
            .send()
            .await
            .map_err(|e| unreachable(INVENTORY_SERVICE, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::ExternalService(format!(
                "{INVENTORY_SERVICE} returned {status}"
            )));
        }

        let reservation = response.json::<Reservation>().await.map_err(|_| {
            ApplicationError::BadUpstreamResponse {
                service: INVENTORY_SERVICE.to_string(),
            }
        })?;
        debug!(delay_ms = reservation.delay_ms, "Stock reserved");
        Ok(reservation)
    }
}
