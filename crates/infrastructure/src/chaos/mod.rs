//! Fault injection for critical user journeys
//!
//! Operators set per-journey faults at runtime; any service on a journey's
//! path consults the shared registry before doing real work.
//!
//! # Overview
//!
//! - `InMemoryFaultRegistry`: process-wide store of active faults
//! - `FaultInjector`: applies a journey's delay and probabilistic error
//! - `ChaosStats`: counters for what the injector actually did
//!
//! # Example
//!
//! ```ignore
//! use infrastructure::chaos::{FaultInjector, InMemoryFaultRegistry, ThreadRandom};
//!
//! let registry = Arc::new(InMemoryFaultRegistry::new());
//! let injector = FaultInjector::new(registry, Arc::new(ThreadRandom), tracer);
//!
//! let result: Result<u32, MyError> = injector
//!     .apply_chaos(JourneyName::Checkout, || async { Ok(42) })
//!     .await;
//! ```

mod chaos_stats;
mod fault_injector;
mod fault_registry;
mod random;

pub use chaos_stats::{ChaosCounters, ChaosStats};
pub use fault_injector::{FaultInjector, InjectedFault};
pub use fault_registry::InMemoryFaultRegistry;
pub use random::{FixedRandom, SeededRandom, ThreadRandom};
