//! Application state shared across handlers

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use application::ports::{DownstreamDelayPort, FaultRegistryPort, InventoryPort, RandomSource};
use application::{ChaosAdminService, CheckoutService};
use infrastructure::{FaultInjector, JourneyRunner, PrometheusHandle, SharedTracer};

/// Shared state of the storefront API
#[derive(Clone)]
pub struct AppState {
    /// Operator control of per-journey faults
    pub chaos_admin: Arc<ChaosAdminService>,
    /// Checkout use case
    pub checkout: Arc<CheckoutService>,
    /// Fault injector consulted on journey paths
    pub injector: FaultInjector,
    /// Journey scopes for critical paths
    pub journeys: JourneyRunner,
    /// Prometheus renderer, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("injector", &self.injector)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services around one process-wide fault registry
    pub fn new(
        registry: Arc<dyn FaultRegistryPort>,
        downstream: Arc<dyn DownstreamDelayPort>,
        inventory: Arc<dyn InventoryPort>,
        random: Arc<dyn RandomSource>,
        tracer: SharedTracer,
    ) -> Self {
        Self {
            chaos_admin: Arc::new(ChaosAdminService::new(Arc::clone(&registry), downstream)),
            checkout: Arc::new(CheckoutService::new(inventory)),
            injector: FaultInjector::new(registry, random, Arc::clone(&tracer)),
            journeys: JourneyRunner::new(tracer),
            metrics: None,
        }
    }

    /// Expose counters through the given Prometheus handle
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Shared state of the inventory service
#[derive(Debug, Clone)]
pub struct InventoryState {
    delay_ms: Arc<AtomicU64>,
}

impl InventoryState {
    /// Start with the given artificial delay
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: Arc::new(AtomicU64::new(delay_ms)),
        }
    }

    /// Current artificial delay in milliseconds
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms.load(Ordering::Relaxed)
    }

    /// Current artificial delay
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms())
    }

    /// Replace the artificial delay; later reservations see the new value
    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::Relaxed);
    }
}
