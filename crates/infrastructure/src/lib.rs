//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the in-memory fault
//! registry and injector, OpenTelemetry journey propagation, the propagating
//! HTTP client and the inventory-svc adapters.

pub mod adapters;
pub mod chaos;
pub mod config;
pub mod http;
pub mod telemetry;

pub use adapters::*;
pub use chaos::{
    ChaosCounters, ChaosStats, FaultInjector, FixedRandom, InMemoryFaultRegistry, InjectedFault,
    SeededRandom, ThreadRandom,
};
pub use config::{AppConfig, ChaosConfig, DownstreamConfig, InventoryConfig, ServerConfig};
pub use http::{PropagatingClientConfig, PropagatingHttpClient};
pub use telemetry::{
    JourneyRunner, PrometheusHandle, SharedTracer, SpanFactory, TelemetryConfig, TelemetryGuard,
    global_tracer, init_telemetry, install_metrics_recorder,
};
