use crate::data::models::cart_item::{CartItem, CartLine};
use crate::data::repos::errors::CartRepoError;
use async_trait::async_trait;
use diesel::result;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<CartLine>, result::Error>;
    async fn get_all(&self) -> Result<Vec<CartLine>, result::Error>;
    async fn get_by_id(&self, cart_item_id: i32) -> Result<Option<CartItem>, result::Error>;

    /// Inserts the line or overwrites its quantity. The flag is `true` when
    /// a new line was created. Stock is checked against the locked product
    /// row but not reserved.
    async fn upsert(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, bool), CartRepoError>;

    /// Sets the quantity of an existing line; zero removes it and yields `None`.
    async fn update_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, CartRepoError>;

    async fn delete(&self, cart_item_id: i32) -> Result<bool, result::Error>;
}
