//! TechMart HTTP presentation layer
//!
//! Routers, handlers and middleware for the storefront API (`techmart-api`)
//! and its inventory collaborator (`inventory-svc`).

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use middleware::{TraceContextLayer, journey_baggage};
pub use routes::{create_inventory_router, create_router};
pub use shutdown::shutdown_signal;
pub use state::{AppState, InventoryState};
