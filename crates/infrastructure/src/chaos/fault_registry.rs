//! In-memory fault registry

use std::collections::BTreeMap;
use std::sync::Arc;

use application::ports::FaultRegistryPort;
use arc_swap::ArcSwap;
use domain::{FaultConfig, JourneyName};
use tracing::debug;

type FaultMap = BTreeMap<JourneyName, FaultConfig>;

/// Fault registry held in memory for the process lifetime
///
/// Readers load an immutable snapshot of the whole map; writers publish a
/// new map in one swap. A reader therefore never sees a half-written entry,
/// and never blocks a writer.
#[derive(Debug, Default)]
pub struct InMemoryFaultRegistry {
    faults: ArcSwap<FaultMap>,
}

impl InMemoryFaultRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, mutate: impl Fn(&mut FaultMap)) {
        self.faults.rcu(|current| {
            let mut next = FaultMap::clone(current);
            mutate(&mut next);
            next
        });
    }
}

impl FaultRegistryPort for InMemoryFaultRegistry {
    fn get(&self, journey: JourneyName) -> Option<FaultConfig> {
        self.faults.load().get(&journey).copied()
    }

    fn set(&self, journey: JourneyName, config: FaultConfig) {
        if config.is_noop() {
            self.clear(journey);
            return;
        }
        self.update(|faults| {
            faults.insert(journey, config);
        });
        debug!(journey = %journey, "Fault stored");
    }

    fn clear(&self, journey: JourneyName) {
        if self.faults.load().contains_key(&journey) {
            self.update(|faults| {
                faults.remove(&journey);
            });
        }
    }

    fn clear_all(&self) {
        self.faults.store(Arc::new(FaultMap::new()));
    }

    fn list(&self) -> BTreeMap<JourneyName, FaultConfig> {
        FaultMap::clone(&self.faults.load())
    }
}
