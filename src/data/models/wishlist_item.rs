use crate::data::models::product::Product;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = wishlist_items)]
#[diesel(primary_key(wishlist_item_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct WishlistItem {
    pub wishlist_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = wishlist_items)]
pub struct NewWishlistItem {
    pub user_id: i32,
    pub product_id: i32,
}
