use crate::api::request::{ValidateRequest, min_len};
use crate::api::response::timestamp;
use crate::data::models::category::Category;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct CategoryRequest {
    pub name: String,
}

impl ValidateRequest for CategoryRequest {
    fn validate(&self) -> Result<(), String> {
        min_len(&self.name, "name", 3)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

impl ValidateRequest for UpdateCategoryRequest {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) => min_len(name, "name", 3),
            None => Ok(()),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryResponse {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            category_id: category.category_id,
            name: category.name,
            slug: category.slug,
            created_at: timestamp(category.created_at),
            updated_at: timestamp(category.updated_at),
        }
    }
}
