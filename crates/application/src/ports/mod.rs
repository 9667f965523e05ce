//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod downstream_delay_port;
mod fault_registry_port;
mod inventory_port;
mod random_source;

#[cfg(test)]
pub use downstream_delay_port::MockDownstreamDelayPort;
pub use downstream_delay_port::{DownstreamDelayPort, RelayedResponse};
#[cfg(test)]
pub use fault_registry_port::MockFaultRegistryPort;
pub use fault_registry_port::{FaultRegistryExt, FaultRegistryPort};
#[cfg(test)]
pub use inventory_port::MockInventoryPort;
pub use inventory_port::{InventoryPort, Reservation, ReservationItem, ReservedItem};
pub use random_source::RandomSource;
