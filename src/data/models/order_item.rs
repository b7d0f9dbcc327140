use crate::data::models::order::Order;
use crate::data::models::product::Product;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(primary_key(order_item_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price at the time the order was placed.
    pub price: BigDecimal,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: BigDecimal,
}
