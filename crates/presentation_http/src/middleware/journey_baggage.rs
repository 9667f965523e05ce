//! Journey stamping for downstream services
//!
//! A service that never opens journey scopes of its own still tags its
//! server span with the journey it was called for, read from inbound
//! baggage. Must run inside [`TraceContextLayer`](super::TraceContextLayer).

use axum::{extract::Request, middleware::Next, response::Response};
use infrastructure::telemetry::stamp_journey_from_baggage;
use opentelemetry::Context;
use tracing::debug;

/// Stamp the active server span with the caller's journey, if any
pub async fn journey_baggage(request: Request, next: Next) -> Response {
    if let Some(journey) = stamp_journey_from_baggage(&Context::current()) {
        debug!(journey = %journey, path = %request.uri().path(), "Request is part of a journey");
    }
    next.run(request).await
}
