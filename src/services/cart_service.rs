use crate::data::models::cart_item::CartItem;
use crate::data::models::product::{Product, ProductImage};
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::repository::ProductRepository;
use crate::services::errors::CartServiceError;
use bigdecimal::BigDecimal;
use std::sync::Arc;

/// A cart line with its product and the product's first image.
#[derive(Debug, Clone)]
pub struct CartEntry {
    pub item: CartItem,
    pub product: Product,
    pub image: Option<ProductImage>,
}

impl CartEntry {
    pub fn subtotal(&self) -> BigDecimal {
        &self.product.price * BigDecimal::from(self.item.quantity)
    }
}

pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        CartService { carts, products }
    }

    /// Adds the product to the cart or overwrites the quantity of the
    /// existing line. The flag is `true` when a line was created.
    pub async fn add_or_update(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, bool), CartServiceError> {
        if quantity <= 0 {
            return Err(CartServiceError::InvalidQuantity(
                "Quantity must be greater than zero",
            ));
        }

        let (item, created) = self.carts.upsert(user_id, product_id, quantity).await?;

        tracing::debug!(user_id, product_id, quantity, created, "Cart line saved");
        Ok((item, created))
    }

    /// Sets the quantity of an existing line. Zero removes the line.
    pub async fn update_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, CartServiceError> {
        if quantity < 0 {
            return Err(CartServiceError::InvalidQuantity("Quantity cannot be negative"));
        }

        Ok(self
            .carts
            .update_quantity(user_id, product_id, quantity)
            .await?)
    }

    pub async fn get_user_cart(&self, user_id: i32) -> Result<Vec<CartEntry>, CartServiceError> {
        let lines = self.carts.get_by_user_id(user_id).await?;
        self.with_images(lines).await
    }

    pub async fn get_all_carts(&self) -> Result<Vec<CartEntry>, CartServiceError> {
        let lines = self.carts.get_all().await?;
        self.with_images(lines).await
    }

    pub async fn get_item(&self, cart_item_id: i32) -> Result<CartItem, CartServiceError> {
        self.carts
            .get_by_id(cart_item_id)
            .await?
            .ok_or(CartServiceError::CartItemNotFound)
    }

    pub async fn remove_item(&self, cart_item_id: i32) -> Result<(), CartServiceError> {
        if !self.carts.delete(cart_item_id).await? {
            return Err(CartServiceError::CartItemNotFound);
        }
        Ok(())
    }

    async fn with_images(
        &self,
        lines: Vec<(CartItem, Product)>,
    ) -> Result<Vec<CartEntry>, CartServiceError> {
        let mut entries = Vec::with_capacity(lines.len());

        for (item, product) in lines {
            let images = self.products.get_images(product.product_id).await?;
            let image = images
                .iter()
                .find(|i| i.is_primary)
                .or_else(|| images.first())
                .cloned();
            entries.push(CartEntry {
                item,
                product,
                image,
            });
        }

        Ok(entries)
    }
}
