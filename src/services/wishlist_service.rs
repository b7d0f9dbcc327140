use crate::data::models::product::Product;
use crate::data::models::wishlist_item::{NewWishlistItem, WishlistItem};
use crate::data::repos::traits::repository::ProductRepository;
use crate::data::repos::traits::wishlist_repository::WishlistRepository;
use crate::services::errors::{WishlistServiceError, is_unique_violation};
use std::sync::Arc;

pub struct WishlistService {
    wishlists: Arc<dyn WishlistRepository>,
    products: Arc<dyn ProductRepository>,
}

impl WishlistService {
    pub fn new(wishlists: Arc<dyn WishlistRepository>, products: Arc<dyn ProductRepository>) -> Self {
        WishlistService {
            wishlists,
            products,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<(WishlistItem, Product)>, WishlistServiceError> {
        Ok(self.wishlists.get_all().await?)
    }

    pub async fn get_by_id(
        &self,
        wishlist_item_id: i32,
    ) -> Result<(WishlistItem, Product), WishlistServiceError> {
        self.wishlists
            .get_by_id(wishlist_item_id)
            .await?
            .ok_or(WishlistServiceError::ItemNotFound)
    }

    pub async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<(WishlistItem, Product)>, WishlistServiceError> {
        Ok(self.wishlists.get_by_user_id(user_id).await?)
    }

    pub async fn add(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<(WishlistItem, Product), WishlistServiceError> {
        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(WishlistServiceError::ProductNotFound)?;

        let item = self
            .wishlists
            .add(NewWishlistItem {
                user_id,
                product_id,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    WishlistServiceError::AlreadyWishlisted
                } else {
                    e.into()
                }
            })?;

        tracing::debug!(user_id, product_id, "Product wishlisted");
        Ok((item, product))
    }

    pub async fn delete(&self, wishlist_item_id: i32) -> Result<(), WishlistServiceError> {
        if !self.wishlists.delete(wishlist_item_id).await? {
            return Err(WishlistServiceError::ItemNotFound);
        }
        Ok(())
    }
}
