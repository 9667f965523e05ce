//! Chaos administration handlers
//!
//! Operator-facing control of per-journey faults plus a relay to the
//! inventory service's artificial delay.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use application::{FaultOverview, FaultSettings, RelayedResponse};
use domain::FaultConfig;
use infrastructure::ChaosStats;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Active faults, valid journeys and injector counters
#[derive(Debug, Serialize)]
pub struct ChaosOverviewResponse {
    #[serde(flatten)]
    pub overview: FaultOverview,
    pub stats: ChaosStats,
}

/// Result of setting a fault
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultUpdateResponse {
    pub journey: String,
    /// False when the normalized settings were a no-op
    pub active: bool,
    #[serde(flatten)]
    pub fault: Option<FaultConfig>,
}

/// Result of clearing faults
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearedResponse {
    pub cleared: String,
}

/// Body of a downstream delay update
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRequest {
    #[serde(default)]
    pub delay_ms: Option<Value>,
}

/// GET /api/admin/chaos
pub async fn list_faults(State(state): State<AppState>) -> Json<ChaosOverviewResponse> {
    Json(ChaosOverviewResponse {
        overview: state.chaos_admin.list_faults(),
        stats: state.injector.stats(),
    })
}

/// PUT /api/admin/chaos/{journey}
///
/// An empty body counts as all-zero settings and clears the fault.
pub async fn set_fault(
    State(state): State<AppState>,
    Path(journey): Path<String>,
    body: Bytes,
) -> Result<Json<FaultUpdateResponse>, ApiError> {
    let settings = parse_body::<FaultSettings>(&body)?;
    let fault = state.chaos_admin.set_fault(&journey, settings)?;

    Ok(Json(FaultUpdateResponse {
        journey,
        active: fault.is_some(),
        fault,
    }))
}

/// DELETE /api/admin/chaos/{journey}
pub async fn clear_fault(
    State(state): State<AppState>,
    Path(journey): Path<String>,
) -> Json<ClearedResponse> {
    state.chaos_admin.clear_fault(&journey);
    Json(ClearedResponse { cleared: journey })
}

/// DELETE /api/admin/chaos
///
/// Also resets the injector counters.
pub async fn clear_all(State(state): State<AppState>) -> Json<ClearedResponse> {
    state.chaos_admin.clear_all();
    state.injector.reset_stats();
    Json(ClearedResponse {
        cleared: "all".to_string(),
    })
}

/// GET /api/admin/chaos/inventory-delay
pub async fn get_inventory_delay(State(state): State<AppState>) -> Result<Response, ApiError> {
    let relayed = state.chaos_admin.downstream_delay().await?;
    Ok(relay(relayed))
}

/// PUT /api/admin/chaos/inventory-delay
pub async fn set_inventory_delay(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = parse_body::<DelayRequest>(&body)?;
    let relayed = state
        .chaos_admin
        .set_downstream_delay(request.delay_ms.as_ref())
        .await?;
    Ok(relay(relayed))
}

fn relay(relayed: RelayedResponse) -> Response {
    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    debug!(status = %status, "Relaying inventory-svc response");
    (status, Json(relayed.body)).into_response()
}

fn parse_body<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}
