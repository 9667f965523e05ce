//! Fault injector for critical user journeys.
//!
//! Looks up the active fault for a journey and applies its delay and
//! probabilistic error around an operation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use application::ports::{FaultRegistryPort, RandomSource};
use domain::{FaultConfig, JourneyName};
use opentelemetry::trace::SpanBuilder;
use opentelemetry::{Context, KeyValue};
use thiserror::Error;
use tracing::{debug, warn};

use super::ChaosCounters;
use super::ChaosStats;
use crate::telemetry::{SharedTracer, SpanScope, attributes};

/// Synthetic failure raised when a journey's error roll fires
///
/// Its own type, so callers can tell deliberate chaos from genuine
/// failures with `E: From<InjectedFault>`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[chaos] Injected fault for journey '{journey}' (errorRate={error_rate})")]
pub struct InjectedFault {
    /// Journey the fault was configured on
    pub journey: JourneyName,
    /// Configured error probability
    pub error_rate: f64,
}

/// Applies registered faults around journey operations
#[derive(Clone)]
pub struct FaultInjector {
    registry: Arc<dyn FaultRegistryPort>,
    random: Arc<dyn RandomSource>,
    tracer: SharedTracer,
    counters: Arc<ChaosCounters>,
}

impl fmt::Debug for FaultInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultInjector")
            .field("random", &self.random)
            .field("stats", &self.counters.snapshot())
            .finish_non_exhaustive()
    }
}

impl FaultInjector {
    /// Create an injector over the shared registry
    pub fn new(
        registry: Arc<dyn FaultRegistryPort>,
        random: Arc<dyn RandomSource>,
        tracer: SharedTracer,
    ) -> Self {
        Self {
            registry,
            random,
            tracer,
            counters: Arc::new(ChaosCounters::new()),
        }
    }

    /// Apply `journey`'s fault, if any, then run `operation`
    ///
    /// - No fault: `operation` runs directly and no span is added.
    /// - A delay is always applied first when configured.
    /// - If the error roll fires, [`InjectedFault`] is returned and
    ///   `operation` is never called.
    ///
    /// Failures from `operation` itself are returned unchanged.
    pub async fn apply_chaos<F, Fut, T, E>(&self, journey: JourneyName, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<InjectedFault>,
    {
        self.counters.record_call();

        let Some(fault) = self.registry.get(journey) else {
            self.counters.record_pass_through();
            return operation().await;
        };

        if fault.has_delay() {
            self.inject_delay(journey, fault).await;
        }

        if fault.has_error() && self.random.next_unit() < fault.error_rate() {
            return Err(self.inject_error(journey, fault).into());
        }

        operation().await
    }

    /// Current counters
    pub fn stats(&self) -> ChaosStats {
        self.counters.snapshot()
    }

    /// Reset the counters
    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    async fn inject_delay(&self, journey: JourneyName, fault: FaultConfig) {
        let delay_ms = i64::try_from(fault.delay_ms()).unwrap_or(i64::MAX);
        let scope = SpanScope::start(
            self.tracer.as_ref(),
            SpanBuilder::from_name("fault.delay").with_attributes(vec![
                KeyValue::new(attributes::CHAOS_DELAY_MS, delay_ms),
                KeyValue::new(attributes::JOURNEY_NAME, journey.as_str()),
            ]),
            &Context::current(),
        );

        debug!(journey = %journey, delay_ms = fault.delay_ms(), "Injecting delay");
        tokio::time::sleep(fault.delay()).await;

        scope.succeed();
        self.counters.record_delay(fault.delay_ms());
        metrics::counter!("chaos_delays_injected_total", "journey" => journey.as_str())
            .increment(1);
    }

    fn inject_error(&self, journey: JourneyName, fault: FaultConfig) -> InjectedFault {
        let injected = InjectedFault {
            journey,
            error_rate: fault.error_rate(),
        };

        let scope = SpanScope::start(
            self.tracer.as_ref(),
            SpanBuilder::from_name("fault.error").with_attributes(vec![
                KeyValue::new(attributes::CHAOS_ERROR_RATE, fault.error_rate()),
                KeyValue::new(attributes::JOURNEY_NAME, journey.as_str()),
            ]),
            &Context::current(),
        );
        scope.fail(&injected.to_string());
        drop(scope);

        warn!(journey = %journey, error_rate = fault.error_rate(), "Injecting error");
        self.counters.record_error();
        metrics::counter!("chaos_errors_injected_total", "journey" => journey.as_str())
            .increment(1);

        injected
    }
}
