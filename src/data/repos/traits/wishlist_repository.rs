use crate::data::models::product::Product;
use crate::data::models::wishlist_item::{NewWishlistItem, WishlistItem};
use async_trait::async_trait;
use diesel::result;

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<(WishlistItem, Product)>, result::Error>;
    async fn get_by_id(
        &self,
        wishlist_item_id: i32,
    ) -> Result<Option<(WishlistItem, Product)>, result::Error>;
    async fn get_by_user_id(&self, user_id: i32)
    -> Result<Vec<(WishlistItem, Product)>, result::Error>;
    async fn add(&self, item: NewWishlistItem) -> Result<WishlistItem, result::Error>;
    async fn delete(&self, wishlist_item_id: i32) -> Result<bool, result::Error>;
}
