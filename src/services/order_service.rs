use crate::data::models::order::{Order, OrderDetails, OrderStatus, UpdateOrder};
use crate::data::repos::traits::order_repository::OrderRepository;
use crate::services::errors::{OrderServiceError, is_foreign_key_violation};
use std::sync::Arc;

/// Input for turning a cart into an order.
#[derive(Debug, Clone, Default)]
pub struct PlaceOrder {
    pub address_id: i32,
    pub discount_code: Option<String>,
}

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        OrderService { repo }
    }

    /// Places an order from the user's whole cart.
    ///
    /// Pricing, discount redemption, stock decrements, order rows and cart
    /// clearing all commit together or not at all.
    pub async fn place_order(
        &self,
        user_id: i32,
        input: PlaceOrder,
    ) -> Result<OrderDetails, OrderServiceError> {
        let code = input
            .discount_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let now = chrono::Utc::now().naive_utc();

        let details = self
            .repo
            .place_order(user_id, input.address_id, code, now)
            .await
            .inspect_err(|e| tracing::warn!(user_id, error = %e, "Order placement rejected"))?;

        tracing::info!(
            order_id = details.order.order_id,
            user_id,
            total = %details.order.total,
            items = details.items.len(),
            "Order placed"
        );

        Ok(details)
    }

    pub async fn get_all(&self) -> Result<Vec<OrderDetails>, OrderServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, order_id: i32) -> Result<OrderDetails, OrderServiceError> {
        self.repo
            .get_by_id(order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<OrderDetails>, OrderServiceError> {
        Ok(self.repo.get_by_user_id(user_id).await?)
    }

    /// Changes the address and/or status. Moving to `CANCELLED` returns the
    /// stock and applies the address change in one transaction.
    pub async fn update_order(
        &self,
        order_id: i32,
        address_id: Option<i32>,
        status: Option<&str>,
    ) -> Result<Order, OrderServiceError> {
        let current = self.get_by_id(order_id).await?.order;

        let next = status
            .map(|s| {
                s.parse::<OrderStatus>()
                    .map_err(|_| OrderServiceError::InvalidStatus(s.to_string()))
            })
            .transpose()?;

        if let Some(next) = next {
            let allowed = current
                .status()
                .is_some_and(|from| from.can_transition_to(next));
            if !allowed {
                return Err(OrderServiceError::InvalidStatusTransition {
                    from: current.status.clone(),
                    to: next.as_str().to_string(),
                });
            }
        }

        let cancelling = next == Some(OrderStatus::Cancelled)
            && current.status() != Some(OrderStatus::Cancelled);
        if cancelling {
            let cancelled = self.repo.cancel_with_restock(order_id, address_id).await?;
            tracing::info!(order_id, "Order cancelled through update");
            return Ok(cancelled);
        }

        let form = UpdateOrder {
            address_id,
            status: next.map(|s| s.as_str().to_string()),
        };

        let updated = self
            .repo
            .update(order_id, form)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    OrderServiceError::AddressNotFound
                } else {
                    e.into()
                }
            })?
            .ok_or(OrderServiceError::OrderNotFound)?;

        tracing::info!(order_id, status = %updated.status, "Order updated");
        Ok(updated)
    }

    /// Marks the order cancelled and returns its items to stock.
    pub async fn cancel_order(&self, order_id: i32) -> Result<Order, OrderServiceError> {
        let order = self.repo.cancel_with_restock(order_id, None).await?;
        tracing::info!(order_id, "Order cancelled");
        Ok(order)
    }

    /// Deletes the order with its items and shipment, returning stock that
    /// a cancellation has not already returned.
    pub async fn delete_order(&self, order_id: i32) -> Result<(), OrderServiceError> {
        self.repo.delete_with_restock(order_id).await?;
        tracing::info!(order_id, "Order deleted");
        Ok(())
    }
}
