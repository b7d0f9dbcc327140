use crate::data::models::product::Product;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = cart_items)]
#[diesel(primary_key(cart_item_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CartItem {
    pub cart_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = cart_items)]
pub struct NewCartItem {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// A cart line joined with the product it points at.
pub type CartLine = (CartItem, Product);
