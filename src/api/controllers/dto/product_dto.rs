use crate::api::request::{ValidateRequest, min_len};
use crate::api::response::timestamp;
use crate::data::models::product::ProductDetails;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateProductRequest {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    /// Kilograms
    pub weight: BigDecimal,
    #[serde(default)]
    pub stock: i32,
}

impl ValidateRequest for CreateProductRequest {
    fn validate(&self) -> Result<(), String> {
        min_len(&self.name, "name", 3)?;
        if let Some(description) = &self.description {
            min_len(description, "description", 3)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateProductRequest {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub weight: Option<BigDecimal>,
    pub stock: Option<i32>,
}

impl ValidateRequest for UpdateProductRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            min_len(name, "name", 3)?;
        }
        if let Some(description) = &self.description {
            min_len(description, "description", 3)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductImageResponse {
    pub image_id: i32,
    pub url: String,
    pub is_primary: bool,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductResponse {
    pub product_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub weight: BigDecimal,
    pub stock: i32,
    pub images: Vec<ProductImageResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ProductResponse {
    /// `image_url` turns a stored file name into a public URL.
    pub fn from_details(details: ProductDetails, image_url: impl Fn(&str) -> String) -> Self {
        let ProductDetails { product, images } = details;

        ProductResponse {
            product_id: product.product_id,
            category_id: product.category_id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            weight: product.weight,
            stock: product.stock,
            images: images
                .into_iter()
                .map(|image| ProductImageResponse {
                    image_id: image.image_id,
                    url: image_url(&image.image),
                    is_primary: image.is_primary,
                })
                .collect(),
            created_at: timestamp(product.created_at),
            updated_at: timestamp(product.updated_at),
        }
    }
}
