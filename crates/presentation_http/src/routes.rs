//! Route definitions

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use infrastructure::SharedTracer;

use crate::handlers;
use crate::middleware::{TraceContextLayer, journey_baggage};
use crate::state::{AppState, InventoryState};

/// Create the storefront router
///
/// The static `inventory-delay` route takes precedence over `{journey}`.
pub fn create_router(state: AppState, tracer: SharedTracer) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        .route("/api/health", get(handlers::health::health_check))
        // Metrics
        .route(
            "/metrics/prometheus",
            get(handlers::metrics::get_metrics_prometheus),
        )
        // Checkout
        .route("/api/orders", post(handlers::orders::place_order))
        // Chaos administration
        .route(
            "/api/admin/chaos",
            get(handlers::chaos::list_faults).delete(handlers::chaos::clear_all),
        )
        .route(
            "/api/admin/chaos/inventory-delay",
            get(handlers::chaos::get_inventory_delay).put(handlers::chaos::set_inventory_delay),
        )
        .route(
            "/api/admin/chaos/{journey}",
            put(handlers::chaos::set_fault).delete(handlers::chaos::clear_fault),
        )
        .fallback(handlers::not_found)
        .layer(TraceContextLayer::new(tracer))
        .with_state(state)
}

/// Create the inventory-svc router
///
/// Server spans are stamped with the caller's journey from inbound baggage.
pub fn create_inventory_router(state: InventoryState, tracer: SharedTracer) -> Router {
    Router::new()
        .route("/health", get(handlers::health::inventory_health))
        .route("/reserve", post(handlers::inventory::reserve))
        .route(
            "/admin/delay",
            get(handlers::inventory::get_delay).put(handlers::inventory::set_delay),
        )
        .fallback(handlers::inventory::not_found)
        // order matters: last added = outermost
        .layer(middleware::from_fn(journey_baggage))
        .layer(TraceContextLayer::new(tracer))
        .with_state(state)
}
