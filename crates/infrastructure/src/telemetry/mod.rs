//! Telemetry, distributed tracing and journey context propagation
//!
//! Provides OpenTelemetry integration for exporting traces, the span
//! capability used by the journey runner and fault injector, and the W3C
//! header carrier that moves journey identity between services.

mod journey;
mod otel;
mod prometheus;
pub mod propagation;
pub(crate) mod span;

pub use journey::{JourneyRunner, stamp_journey_from_baggage};
pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, global_tracer, init_telemetry};
pub use prometheus::{PrometheusHandle, install_metrics_recorder};
pub use propagation::{current_journey, extract_context, inject_context};
pub use span::{SharedTracer, SpanFactory, SpanScope, attributes, with_active_context};
