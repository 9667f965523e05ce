//! Injected fault configuration value object

use std::time::Duration;

use serde::Serialize;

/// The active injected fault for one journey
///
/// Values are normalized on construction: the delay is a whole number of
/// milliseconds and the error rate lies in `[0, 1]`. A config with both
/// fields zero is a no-op and is never stored by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FaultConfig {
    delay_ms: u64,
    error_rate: f64,
}

impl FaultConfig {
    /// Create a config from an exact delay and a rate, clamping the rate
    #[must_use]
    pub fn new(delay_ms: u64, error_rate: f64) -> Self {
        Self {
            delay_ms,
            error_rate: clamp_rate(error_rate),
        }
    }

    /// Create a config from raw, possibly out-of-range administrative input
    ///
    /// Negative or NaN delays become zero, fractional delays are floored,
    /// and the rate is clamped to `[0, 1]` (NaN becomes zero).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalized(delay_ms: f64, error_rate: f64) -> Self {
        let delay_ms = if delay_ms > 0.0 {
            // saturating float-to-int cast
            delay_ms.floor() as u64
        } else {
            0
        };
        Self::new(delay_ms, error_rate)
    }

    /// Configured delay in milliseconds
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Configured delay as a duration
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Configured error probability in `[0, 1]`
    #[must_use]
    pub const fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Whether a delay should be injected
    #[must_use]
    pub const fn has_delay(&self) -> bool {
        self.delay_ms > 0
    }

    /// Whether an error roll should happen
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error_rate > 0.0
    }

    /// Whether this config injects nothing
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.has_delay() && !self.has_error()
    }
}

fn clamp_rate(rate: f64) -> f64 {
    // also maps NaN and -0.0 to 0.0
    if rate > 0.0 { rate.min(1.0) } else { 0.0 }
}
