//! inventory-svc handlers
//!
//! A stand-in stock service with a live-adjustable artificial latency.

use axum::{Json, extract::State, http::Uri};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::InventoryState;

/// Line item as received by inventory-svc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// Reservation request body
#[derive(Debug, Default, Deserialize)]
pub struct ReserveRequest {
    #[serde(default)]
    pub items: Option<Vec<ReserveItem>>,
}

/// Reserved line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedLine {
    pub product_id: u64,
    pub quantity: u32,
    pub reserved: bool,
}

/// Reservation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub reserved: bool,
    pub items: Vec<ReservedLine>,
    pub delay_ms: u64,
}

/// Current artificial delay
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayResponse {
    pub delay_ms: u64,
}

/// Artificial delay update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayUpdate {
    #[serde(default)]
    pub delay_ms: Option<Value>,
}

/// POST /reserve
pub async fn reserve(
    State(state): State<InventoryState>,
    Json(request): Json<ReserveRequest>,
) -> Result<Json<ReserveResponse>, ApiError> {
    let items = request
        .items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| ApiError::BadRequest("items is required".to_string()))?;

    let delay_ms = state.delay_ms();
    debug!(items = items.len(), delay_ms, "Reserving stock");
    tokio::time::sleep(state.delay()).await;

    let items = items
        .into_iter()
        .map(|item| ReservedLine {
            product_id: item.product_id,
            quantity: item.quantity,
            reserved: true,
        })
        .collect();

    Ok(Json(ReserveResponse {
        reserved: true,
        items,
        delay_ms,
    }))
}

/// GET /admin/delay
pub async fn get_delay(State(state): State<InventoryState>) -> Json<DelayResponse> {
    Json(DelayResponse {
        delay_ms: state.delay_ms(),
    })
}

/// PUT /admin/delay
///
/// Takes effect for the next reservation; fractional values are floored.
pub async fn set_delay(
    State(state): State<InventoryState>,
    Json(update): Json<DelayUpdate>,
) -> Result<Json<DelayResponse>, ApiError> {
    let delay_ms = update
        .delay_ms
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|ms| *ms >= 0.0)
        .ok_or_else(|| ApiError::BadRequest("delayMs must be a non-negative number".to_string()))?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let delay_ms = delay_ms.floor() as u64;
    state.set_delay_ms(delay_ms);
    info!(delay_ms, "Artificial delay updated");

    Ok(Json(DelayResponse { delay_ms }))
}

/// Fallback for unknown inventory-svc routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("{} not found", uri.path()))
}
