//! HTTP middleware components
//!
//! Trace context continuation and journey stamping for inbound requests.

mod journey_baggage;
mod trace_context;

pub use journey_baggage::journey_baggage;
pub use trace_context::{TraceContextLayer, TraceContextService};
