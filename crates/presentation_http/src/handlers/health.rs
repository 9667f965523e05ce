//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::InventoryState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness check for the storefront API
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "techmart-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Inventory service health, including its current artificial delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryHealthResponse {
    pub status: String,
    pub delay_ms: u64,
}

/// Liveness check for inventory-svc
pub async fn inventory_health(State(state): State<InventoryState>) -> Json<InventoryHealthResponse> {
    Json(InventoryHealthResponse {
        status: "ok".to_string(),
        delay_ms: state.delay_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn api_health_is_ok() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.service, "techmart-api");
    }

    #[tokio::test]
    async fn inventory_health_reports_delay() {
        let Json(resp) = inventory_health(State(InventoryState::new(750))).await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.delay_ms, 750);
    }
}
