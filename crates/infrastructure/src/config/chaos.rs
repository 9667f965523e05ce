//! Fault injection configuration.

use std::sync::Arc;

use application::ports::RandomSource;
use serde::{Deserialize, Serialize};

use crate::chaos::{SeededRandom, ThreadRandom};

/// Fault injection settings
///
/// Faults themselves are set at runtime through the admin API and are never
/// read from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Seed for a repeatable error-roll sequence; unset uses thread randomness
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ChaosConfig {
    /// Random source for the fault injector's error rolls
    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        }
    }
}
