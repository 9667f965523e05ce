//! HTTP clients with trace context propagation
//!
//! Outgoing requests carry the ambient W3C `traceparent` and `baggage`
//! headers, so journey identity follows the call into other services.

mod propagating_client;

pub use propagating_client::{
    PropagatingClientConfig, PropagatingHttpClient, PropagatingRequestBuilder,
};
