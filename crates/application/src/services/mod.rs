//! Application services - use cases built on ports

mod chaos_admin_service;
mod checkout_service;

pub use chaos_admin_service::{ChaosAdminService, FaultOverview, FaultSettings};
pub use checkout_service::{CheckoutService, OrderConfirmation, OrderRequest};
