//! Inventory port
//!
//! Defines the stock reservation call made on the checkout critical path.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One line of an order to reserve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationItem {
    /// Product identifier
    pub product_id: u64,
    /// Units requested
    pub quantity: u32,
}

/// One reserved line as confirmed by the inventory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedItem {
    /// Product identifier
    pub product_id: u64,
    /// Units reserved
    pub quantity: u32,
    /// Whether this line was reserved
    pub reserved: bool,
}

/// Reservation confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Whether the whole reservation succeeded
    pub reserved: bool,
    /// Reserved lines
    pub items: Vec<ReservedItem>,
    /// Artificial delay the inventory service applied
    pub delay_ms: u64,
}

/// Port for stock reservation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// Reserve stock for the given lines
    async fn reserve(&self, items: &[ReservationItem]) -> Result<Reservation, ApplicationError>;
}
