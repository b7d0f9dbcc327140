use crate::data::models::schema::*;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = discounts)]
#[diesel(primary_key(discount_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Discount {
    pub discount_id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<NaiveDateTime>,
    pub usage_count: i32,
    pub max_usage: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Discount {
    /// Unknown type strings fall back to a fixed amount.
    pub fn kind(&self) -> DiscountType {
        self.discount_type.parse().unwrap_or(DiscountType::Fixed)
    }

    /// A discount without an expiry date never expires.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_usage
            .is_some_and(|max_usage| self.usage_count >= max_usage)
    }

    pub fn meets_minimum(&self, subtotal: &BigDecimal) -> bool {
        match &self.min_purchase {
            Some(minimum) => subtotal >= minimum,
            None => true,
        }
    }

    /// Amount taken off `subtotal`. Never exceeds the subtotal and never
    /// goes below zero.
    pub fn amount_for(&self, subtotal: &BigDecimal) -> BigDecimal {
        let raw = match self.kind() {
            DiscountType::Fixed => self.value.clone(),
            DiscountType::Percentage => {
                let amount = (subtotal * &self.value / BigDecimal::from(100))
                    .with_scale_round(2, RoundingMode::HalfUp);
                match &self.max_discount {
                    Some(cap) if &amount > cap => cap.clone(),
                    _ => amount,
                }
            }
        };

        if raw < BigDecimal::zero() {
            BigDecimal::zero()
        } else {
            raw.min(subtotal.clone())
        }
    }
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = discounts)]
pub struct NewDiscount {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<NaiveDateTime>,
    pub max_usage: Option<i32>,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = discounts)]
pub struct UpdateDiscount {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<String>,
    pub value: Option<BigDecimal>,
    pub min_purchase: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<NaiveDateTime>,
    pub max_usage: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    Fixed,
    Percentage,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Fixed => "FIXED",
            DiscountType::Percentage => "PERCENTAGE",
        }
    }
}

impl FromStr for DiscountType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FIXED" => Ok(DiscountType::Fixed),
            "PERCENTAGE" => Ok(DiscountType::Percentage),
            _ => Err("Unknown discount type"),
        }
    }
}
