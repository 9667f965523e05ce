//! Counters for what the fault injector actually did

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Point-in-time view of the injector's counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosStats {
    /// Total number of calls processed
    pub total_calls: u64,
    /// Calls for journeys with no active fault
    pub passed_through: u64,
    /// Number of delays injected
    pub delays_injected: u64,
    /// Number of errors injected
    pub errors_injected: u64,
    /// Total latency added (milliseconds)
    pub total_delay_ms: u64,
}

impl ChaosStats {
    /// Fraction of calls that were short-circuited with an injected error
    #[allow(clippy::cast_precision_loss)]
    pub fn actual_error_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.errors_injected as f64 / self.total_calls as f64
        }
    }
}

/// Lock-free counters shared by every clone of an injector
#[derive(Debug, Default)]
pub struct ChaosCounters {
    total_calls: AtomicU64,
    passed_through: AtomicU64,
    delays_injected: AtomicU64,
    errors_injected: AtomicU64,
    total_delay_ms: AtomicU64,
}

impl ChaosCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_call(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_pass_through(&self) {
        self.passed_through.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delay(&self, delay_ms: u64) {
        self.delays_injected.fetch_add(1, Ordering::Relaxed);
        self.total_delay_ms.fetch_add(delay_ms, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors_injected.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current values
    pub fn snapshot(&self) -> ChaosStats {
        ChaosStats {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            passed_through: self.passed_through.load(Ordering::Relaxed),
            delays_injected: self.delays_injected.load(Ordering::Relaxed),
            errors_injected: self.errors_injected.load(Ordering::Relaxed),
            total_delay_ms: self.total_delay_ms.load(Ordering::Relaxed),
        }
    }

    /// Reset every counter to zero
    pub fn reset(&self) {
        for counter in [
            &self.total_calls,
            &self.passed_through,
            &self.delays_injected,
            &self.errors_injected,
            &self.total_delay_ms,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
