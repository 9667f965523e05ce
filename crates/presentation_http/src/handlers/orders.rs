//! Order placement handler

use axum::{Json, extract::State, http::StatusCode};
use application::{OrderConfirmation, OrderRequest};
use domain::JourneyName;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/orders
///
/// Runs as the `checkout` journey. Any fault configured on the journey is
/// applied before the order is validated and stock is reserved.
pub async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderConfirmation>), ApiError> {
    let checkout = state.checkout.clone();
    let injector = state.injector.clone();

    let confirmation = state
        .journeys
        .with_journey(
            JourneyName::Checkout,
            injector.apply_chaos(JourneyName::Checkout, move || async move {
                checkout.place_order(request).await.map_err(ApiError::from)
            }),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}
