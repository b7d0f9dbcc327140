use crate::data::models::category::Category;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(belongs_to(Category, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Product {
    pub product_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    /// Weight of one unit in kilograms.
    pub weight: BigDecimal,
    pub stock: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock >= quantity
    }
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub weight: BigDecimal,
    pub stock: i32,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = products)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub weight: Option<BigDecimal>,
    pub stock: Option<i32>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = product_images)]
#[diesel(primary_key(image_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct ProductImage {
    pub image_id: i32,
    pub product_id: i32,
    /// Stored file name, relative to the upload directory.
    pub image: String,
    pub is_primary: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = product_images)]
pub struct NewProductImage {
    pub product_id: i32,
    pub image: String,
    pub is_primary: bool,
}

/// A product with its images, primary first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: Product,
    pub images: Vec<ProductImage>,
}
