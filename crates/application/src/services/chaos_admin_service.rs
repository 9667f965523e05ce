//! Chaos administration service
//!
//! Backs the operator-facing control surface: listing, setting and clearing
//! per-journey faults, and relaying the downstream collaborator's delay.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use domain::{FaultConfig, JourneyName};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{DownstreamDelayPort, FaultRegistryExt, FaultRegistryPort, RelayedResponse};

/// Raw fault settings as submitted by an operator
///
/// Missing fields default to zero. Values may be out of range and are
/// normalized before they reach the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultSettings {
    /// Requested delay in milliseconds
    #[serde(default)]
    pub delay_ms: f64,
    /// Requested error probability
    #[serde(default)]
    pub error_rate: f64,
}

impl FaultSettings {
    /// Normalize into a storable config
    #[must_use]
    pub fn normalize(self) -> FaultConfig {
        FaultConfig::normalized(self.delay_ms, self.error_rate)
    }
}

/// Every active fault plus the closed set of journey names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultOverview {
    /// Active faults keyed by journey
    pub faults: BTreeMap<JourneyName, FaultConfig>,
    /// Every journey a fault may be set on
    pub valid_journeys: Vec<JourneyName>,
}

/// Administrative use cases for fault injection
pub struct ChaosAdminService {
    registry: Arc<dyn FaultRegistryPort>,
    downstream: Arc<dyn DownstreamDelayPort>,
}

impl fmt::Debug for ChaosAdminService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaosAdminService").finish_non_exhaustive()
    }
}

impl ChaosAdminService {
    /// Create a new admin service over the shared registry
    pub fn new(
        registry: Arc<dyn FaultRegistryPort>,
        downstream: Arc<dyn DownstreamDelayPort>,
    ) -> Self {
        Self {
            registry,
            downstream,
        }
    }

    /// List active faults and valid journey names
    pub fn list_faults(&self) -> FaultOverview {
        FaultOverview {
            faults: self.registry.list(),
            valid_journeys: JourneyName::ALL.to_vec(),
        }
    }

    /// Set the fault for a journey given by wire name
    ///
    /// Returns the stored config, or `None` when the normalized settings were
    /// a no-op and the journey's fault was cleared.
    #[instrument(skip(self))]
    pub fn set_fault(
        &self,
        name: &str,
        settings: FaultSettings,
    ) -> Result<Option<FaultConfig>, ApplicationError> {
        let config = settings.normalize();
        let journey = self.registry.set_named(name, config)?;

        info!(
            journey = %journey,
            delay_ms = config.delay_ms(),
            error_rate = config.error_rate(),
            "Fault updated"
        );

        Ok(self.registry.get(journey))
    }

    /// Clear the fault for a journey given by wire name
    ///
    /// Unknown names are a no-op.
    pub fn clear_fault(&self, name: &str) {
        match name.parse::<JourneyName>() {
            Ok(journey) => {
                self.registry.clear(journey);
                info!(journey = %journey, "Fault cleared");
            },
            Err(_) => debug!(name, "Ignoring clear for unknown journey"),
        }
    }

    /// Clear every fault
    pub fn clear_all(&self) {
        self.registry.clear_all();
        info!("All faults cleared");
    }

    /// Read the downstream collaborator's delay
    pub async fn downstream_delay(&self) -> Result<RelayedResponse, ApplicationError> {
        self.downstream.current_delay().await
    }

    /// Validate and relay a new delay to the downstream collaborator
    ///
    /// Anything that is not a non-negative JSON number is rejected before
    /// any relay attempt.
    pub async fn set_downstream_delay(
        &self,
        delay_ms: Option<&serde_json::Value>,
    ) -> Result<RelayedResponse, ApplicationError> {
        let number = match delay_ms {
            Some(serde_json::Value::Number(n)) if n.as_f64().is_some_and(|v| v >= 0.0) => {
                n.clone()
            },
            _ => {
                return Err(ApplicationError::InvalidDelay(
                    "delayMs must be a non-negative number".to_string(),
                ));
            },
        };

        info!(delay_ms = %number, "Relaying downstream delay");
        self.downstream.update_delay(number).await
    }
}
