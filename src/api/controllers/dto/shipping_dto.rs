use crate::api::request::{ValidateRequest, require};
use crate::api::response::timestamp;
use crate::data::models::shipment::Shipment;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateShipmentRequest {
    pub order_id: i32,
    pub courier: String,
    pub service: String,
}

impl ValidateRequest for CreateShipmentRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.courier, "courier")?;
        require(&self.service, "service")
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateShipmentRequest {
    pub status: Option<String>,
    pub tracking_number: Option<String>,
}

impl ValidateRequest for UpdateShipmentRequest {
    fn validate(&self) -> Result<(), String> {
        if self.status.is_none() && self.tracking_number.is_none() {
            return Err("status or tracking_number is required".to_string());
        }
        Ok(())
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShipmentResponse {
    pub shipment_id: i32,
    pub order_id: i32,
    pub origin_city: String,
    pub destination_city: String,
    /// Grams
    pub weight: i32,
    pub courier: String,
    pub service: String,
    pub cost: BigDecimal,
    pub etd: String,
    pub status: String,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
    pub created_at: Option<String>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        ShipmentResponse {
            shipment_id: shipment.shipment_id,
            order_id: shipment.order_id,
            origin_city: shipment.origin_city,
            destination_city: shipment.destination_city,
            weight: shipment.weight,
            courier: shipment.courier,
            service: shipment.service,
            cost: shipment.cost,
            etd: shipment.etd,
            status: shipment.status,
            tracking_number: shipment.tracking_number,
            shipped_at: timestamp(shipment.shipped_at),
            delivered_at: timestamp(shipment.delivered_at),
            created_at: timestamp(shipment.created_at),
        }
    }
}
