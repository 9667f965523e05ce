//! Fault registry port
//!
//! Defines the keyed store of active injected faults, one entry per journey.

use std::collections::BTreeMap;

use domain::{DomainError, FaultConfig, JourneyName};
#[cfg(test)]
use mockall::automock;

/// Port for the process-wide fault registry
///
/// Implementations must make every mutation atomic from a concurrent
/// reader's perspective and must never hold a no-op entry.
#[cfg_attr(test, automock)]
pub trait FaultRegistryPort: Send + Sync {
    /// Look up the active fault for a journey
    fn get(&self, journey: JourneyName) -> Option<FaultConfig>;

    /// Replace the fault for a journey
    ///
    /// A no-op config removes any existing entry.
    fn set(&self, journey: JourneyName, config: FaultConfig);

    /// Remove the fault for a journey, if any
    fn clear(&self, journey: JourneyName);

    /// Remove every fault
    fn clear_all(&self);

    /// Snapshot of every active fault
    fn list(&self) -> BTreeMap<JourneyName, FaultConfig>;
}

/// Extension methods available on every fault registry
pub trait FaultRegistryExt: FaultRegistryPort {
    /// Replace the fault for a journey given by wire name
    ///
    /// Rejects names outside the closed set without touching the registry.
    fn set_named(&self, name: &str, config: FaultConfig) -> Result<JourneyName, DomainError> {
        let journey: JourneyName = name.parse()?;
        self.set(journey, config);
        Ok(journey)
    }
}

impl<T: FaultRegistryPort + ?Sized> FaultRegistryExt for T {}
