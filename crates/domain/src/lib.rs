//! Domain layer for the TechMart critical user journey engine
//!
//! Defines the closed set of journeys, the fault configuration value object
//! and domain errors. This layer performs no I/O.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
