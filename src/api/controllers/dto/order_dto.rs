use crate::api::request::ValidateRequest;
use crate::api::response::timestamp;
use crate::data::models::order::OrderDetails;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct PlaceOrderRequest {
    pub address_id: i32,
    pub discount_code: Option<String>,
}

impl ValidateRequest for PlaceOrderRequest {
    fn validate(&self) -> Result<(), String> {
        if self.address_id <= 0 {
            return Err("address_id is required".to_string());
        }
        Ok(())
    }
}

/// Struct for updating order address or status
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateOrderRequest {
    pub address_id: Option<i32>,
    pub status: Option<String>,
}

impl ValidateRequest for UpdateOrderRequest {
    fn validate(&self) -> Result<(), String> {
        if self.address_id.is_none() && self.status.is_none() {
            return Err("address_id or status is required".to_string());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderItemResponse {
    pub order_item_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub subtotal: BigDecimal,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub discount_id: Option<i32>,
    pub total: BigDecimal,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        let OrderDetails { order, items } = details;

        Self {
            order_id: order.order_id,
            user_id: order.user_id,
            address_id: order.address_id,
            discount_id: order.discount_id,
            total: order.total,
            status: order.status,
            items: items
                .into_iter()
                .map(|(item, product)| OrderItemResponse {
                    subtotal: &item.price * BigDecimal::from(item.quantity),
                    order_item_id: item.order_item_id,
                    product_id: item.product_id,
                    name: product.name,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            created_at: timestamp(order.created_at),
            updated_at: timestamp(order.updated_at),
        }
    }
}
