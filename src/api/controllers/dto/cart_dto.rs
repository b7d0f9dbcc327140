use crate::api::request::ValidateRequest;
use crate::data::models::cart_item::CartItem;
use crate::services::cart_service::CartEntry;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Body of both the add and the set-quantity calls.
#[derive(Deserialize, Debug, Clone)]
pub struct CartItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

impl ValidateRequest for CartItemRequest {
    fn validate(&self) -> Result<(), String> {
        if self.product_id <= 0 {
            return Err("product_id is required".to_string());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CartItemResponse {
    pub cart_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            cart_item_id: item.cart_item_id,
            user_id: item.user_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CartLineResponse {
    pub cart_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub quantity: i32,
    pub subtotal: BigDecimal,
    pub image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: BigDecimal,
}

impl CartResponse {
    pub fn from_entries(entries: Vec<CartEntry>, image_url: impl Fn(&str) -> String) -> Self {
        let items: Vec<CartLineResponse> = entries
            .into_iter()
            .map(|entry| CartLineResponse {
                subtotal: entry.subtotal(),
                cart_item_id: entry.item.cart_item_id,
                user_id: entry.item.user_id,
                product_id: entry.product.product_id,
                name: entry.product.name,
                price: entry.product.price,
                stock: entry.product.stock,
                quantity: entry.item.quantity,
                image: entry.image.map(|i| image_url(&i.image)),
            })
            .collect();

        let total = items
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + &line.subtotal);

        CartResponse { items, total }
    }
}
