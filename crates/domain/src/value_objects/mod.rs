//! Value objects - immutable domain primitives

mod fault_config;
mod journey_name;

pub use fault_config::FaultConfig;
pub use journey_name::JourneyName;
