//! Checkout service
//!
//! The checkout critical path: validate the order and reserve stock with the
//! inventory collaborator. Order persistence lives outside this crate.

use std::fmt;
use std::sync::Arc;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::ApplicationError;
use crate::ports::{InventoryPort, ReservationItem};

/// An order submitted at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub items: Vec<ReservationItem>,
}

impl OrderRequest {
    fn validate(&self) -> Result<(), DomainError> {
        let missing = [
            &self.customer_name,
            &self.customer_email,
            &self.shipping_address,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if missing || self.items.is_empty() {
            return Err(DomainError::ValidationError(
                "Missing required order fields".to_string(),
            ));
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(DomainError::ValidationError(format!(
                "Quantity for product {} must be at least 1",
                item.product_id
            )));
        }
        Ok(())
    }

    fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Confirmation returned for a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub item_count: u64,
    pub reserved: bool,
}

/// Checkout use case
pub struct CheckoutService {
    inventory: Arc<dyn InventoryPort>,
}

impl fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutService").finish_non_exhaustive()
    }
}

impl CheckoutService {
    pub fn new(inventory: Arc<dyn InventoryPort>) -> Self {
        Self { inventory }
    }

    /// Validate the order and reserve its stock
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn place_order(
        &self,
        request: OrderRequest,
    ) -> Result<OrderConfirmation, ApplicationError> {
        request.validate()?;

        let reservation = self.inventory.reserve(&request.items).await?;
        if !reservation.reserved {
            return Err(ApplicationError::ExternalService(
                "Inventory declined the reservation".to_string(),
            ));
        }

        let item_count = request.item_count();
        let id = Uuid::now_v7();
        debug!(order_id = %id, item_count, "Order confirmed");

        Ok(OrderConfirmation {
            id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            status: "confirmed".to_string(),
            item_count,
            reserved: reservation.reserved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockInventoryPort, Reservation, ReservedItem};

    fn order() -> OrderRequest {
        OrderRequest {
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            shipping_address: "1 Analytical Way".to_string(),
            items: vec![
                ReservationItem {
                    product_id: 1,
                    quantity: 2,
                },
                ReservationItem {
                    product_id: 7,
                    quantity: 1,
                },
            ],
        }
    }

    fn reservation_for(items: &[ReservationItem]) -> Reservation {
        Reservation {
            reserved: true,
            items: items
                .iter()
                .map(|i| ReservedItem {
                    product_id: i.product_id,
                    quantity: i.quantity,
                    reserved: true,
                })
                .collect(),
            delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn place_order_reserves_and_confirms() {
        let mut inventory = MockInventoryPort::new();
        inventory
            .expect_reserve()
            .times(1)
            .returning(|items| Ok(reservation_for(items)));
        let service = CheckoutService::new(Arc::new(inventory));

        let confirmation = service.place_order(order()).await.unwrap();

        assert_eq!(confirmation.status, "confirmed");
        assert_eq!(confirmation.item_count, 3);
        assert!(confirmation.reserved);
        assert_eq!(confirmation.customer_name, "Ada");
    }

    #[tokio::test]
    async fn missing_fields_never_reach_inventory() {
        let mut inventory = MockInventoryPort::new();
        inventory.expect_reserve().never();
        let service = CheckoutService::new(Arc::new(inventory));

        let mut request = order();
        request.shipping_address = "  ".to_string();
        let err = service.place_order(request).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ValidationError(_))
        ));

        let mut request = order();
        request.items.clear();
        assert!(service.place_order(request).await.is_err());
    }

    #[tokio::test]
    async fn huge_quantities_are_counted_without_overflow() {
        let mut inventory = MockInventoryPort::new();
        inventory
            .expect_reserve()
            .returning(|items| Ok(reservation_for(items)));
        let service = CheckoutService::new(Arc::new(inventory));

        let mut request = order();
        request.items[0].quantity = u32::MAX;
        request.items[1].quantity = u32::MAX;
        let confirmation = service.place_order(request).await.unwrap();

        assert_eq!(confirmation.item_count, 2 * u64::from(u32::MAX));
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let mut inventory = MockInventoryPort::new();
        inventory.expect_reserve().never();
        let service = CheckoutService::new(Arc::new(inventory));

        let mut request = order();
        request.items[1].quantity = 0;
        let err = service.place_order(request).await.unwrap_err();
        assert!(err.to_string().contains("product 7"));
    }

    #[tokio::test]
    async fn inventory_failures_propagate_unchanged() {
        let mut inventory = MockInventoryPort::new();
        inventory.expect_reserve().returning(|_| {
            Err(ApplicationError::UpstreamUnreachable {
                service: "inventory-svc".to_string(),
                reason: "connection refused".to_string(),
            })
        });
        let service = CheckoutService::new(Arc::new(inventory));

        let err = service.place_order(order()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamUnreachable { .. }));
    }

    #[tokio::test]
    async fn declined_reservation_is_an_external_error() {
        let mut inventory = MockInventoryPort::new();
        inventory.expect_reserve().returning(|items| {
            let mut reservation = reservation_for(items);
            reservation.reserved = false;
            Ok(reservation)
        });
        let service = CheckoutService::new(Arc::new(inventory));

        let err = service.place_order(order()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
