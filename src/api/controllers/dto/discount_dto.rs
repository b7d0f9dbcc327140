use crate::api::request::{ValidateRequest, require};
use crate::api::response::timestamp;
use crate::data::models::discount::Discount;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateDiscountRequest {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<NaiveDateTime>,
    pub max_usage: Option<i32>,
}

impl ValidateRequest for CreateDiscountRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.code, "code")?;
        require(&self.discount_type, "discount_type")
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateDiscountRequest {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<String>,
    pub value: Option<BigDecimal>,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<NaiveDateTime>,
    pub max_usage: Option<i32>,
}

impl ValidateRequest for UpdateDiscountRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(code) = &self.code {
            require(code, "code")?;
        }
        Ok(())
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DiscountResponse {
    pub discount_id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<String>,
    pub usage_count: i32,
    pub max_usage: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        DiscountResponse {
            discount_id: discount.discount_id,
            code: discount.code,
            description: discount.description,
            discount_type: discount.discount_type,
            value: discount.value,
            min_purchase: discount.min_purchase,
            max_discount: discount.max_discount,
            expires_at: timestamp(discount.expires_at),
            usage_count: discount.usage_count,
            max_usage: discount.max_usage,
            created_at: timestamp(discount.created_at),
            updated_at: timestamp(discount.updated_at),
        }
    }
}
