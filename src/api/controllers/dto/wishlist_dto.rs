use crate::api::response::timestamp;
use crate::api::request::ValidateRequest;
use crate::data::models::product::Product;
use crate::data::models::wishlist_item::WishlistItem;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct AddWishlistRequest {
    pub product_id: i32,
}

impl ValidateRequest for AddWishlistRequest {
    fn validate(&self) -> Result<(), String> {
        if self.product_id <= 0 {
            return Err("product_id is required".to_string());
        }
        Ok(())
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WishlistItemResponse {
    pub wishlist_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_slug: String,
    pub price: BigDecimal,
    pub created_at: Option<String>,
}

impl From<(WishlistItem, Product)> for WishlistItemResponse {
    fn from((item, product): (WishlistItem, Product)) -> Self {
        WishlistItemResponse {
            wishlist_item_id: item.wishlist_item_id,
            user_id: item.user_id,
            product_id: item.product_id,
            product_name: product.name,
            product_slug: product.slug,
            price: product.price,
            created_at: timestamp(item.created_at),
        }
    }
}
