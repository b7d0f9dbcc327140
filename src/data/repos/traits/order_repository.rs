use crate::data::models::order::{Order, OrderDetails, UpdateOrder};
use crate::data::repos::errors::OrderRepoError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::result;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<OrderDetails>, result::Error>;
    async fn get_by_id(&self, order_id: i32) -> Result<Option<OrderDetails>, result::Error>;
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<OrderDetails>, result::Error>;
    async fn update(&self, order_id: i32, form: UpdateOrder)
    -> Result<Option<Order>, result::Error>;

    /// Turns the user's cart into an order. Stock, discount usage, the order
    /// rows and the cart are written in one transaction; on any error
    /// nothing is persisted.
    async fn place_order(
        &self,
        user_id: i32,
        address_id: i32,
        discount_code: Option<String>,
        now: NaiveDateTime,
    ) -> Result<OrderDetails, OrderRepoError>;

    /// Removes the shipment, the items and the order. Stock is returned
    /// unless the order was already cancelled.
    async fn delete_with_restock(&self, order_id: i32) -> Result<(), OrderRepoError>;

    /// Restocks every line and marks the order cancelled, moving it to
    /// `address_id` in the same transaction when one is given.
    async fn cancel_with_restock(
        &self,
        order_id: i32,
        address_id: Option<i32>,
    ) -> Result<Order, OrderRepoError>;
}
