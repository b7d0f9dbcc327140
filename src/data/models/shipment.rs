use crate::data::models::order::Order;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = shipments)]
#[diesel(primary_key(shipment_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Shipment {
    pub shipment_id: i32,
    pub order_id: i32,
    pub origin_city: String,
    pub destination_city: String,
    /// Total parcel weight in grams.
    pub weight: i32,
    pub courier: String,
    pub service: String,
    pub cost: BigDecimal,
    pub etd: String,
    pub status: String,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Shipment {
    pub fn status(&self) -> Option<ShipmentStatus> {
        self.status.parse().ok()
    }
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = shipments)]
pub struct NewShipment {
    pub order_id: i32,
    pub origin_city: String,
    pub destination_city: String,
    pub weight: i32,
    pub courier: String,
    pub service: String,
    pub cost: BigDecimal,
    pub etd: String,
    pub status: String,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = shipments)]
pub struct UpdateShipment {
    pub status: Option<String>,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipmentStatus {
    Created,
    Shipped,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Created => "CREATED",
            ShipmentStatus::Shipped => "SHIPPED",
            ShipmentStatus::Delivered => "DELIVERED",
            ShipmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        use ShipmentStatus::*;
        matches!(
            (self, next),
            (Created, Shipped) | (Shipped, Delivered) | (Created, Cancelled) | (Shipped, Cancelled)
        )
    }
}

impl FromStr for ShipmentStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATED" => Ok(ShipmentStatus::Created),
            "SHIPPED" => Ok(ShipmentStatus::Shipped),
            "DELIVERED" => Ok(ShipmentStatus::Delivered),
            "CANCELLED" => Ok(ShipmentStatus::Cancelled),
            _ => Err("Unknown shipment status"),
        }
    }
}
