use crate::data::models::order::{OrderDetails, OrderStatus};
use crate::data::models::shipment::{NewShipment, Shipment, ShipmentStatus, UpdateShipment};
use crate::data::repos::traits::order_repository::OrderRepository;
use crate::data::repos::traits::repository::{AddressRepository, ShipmentRepository};
use crate::services::city_cache::CityCache;
use crate::services::errors::{ShippingServiceError, is_unique_violation};
use crate::services::rate_client::{CostRequest, ShippingRateClient};
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use std::sync::Arc;

pub struct ShippingService {
    orders: Arc<dyn OrderRepository>,
    addresses: Arc<dyn AddressRepository>,
    shipments: Arc<dyn ShipmentRepository>,
    rates: Arc<dyn ShippingRateClient>,
    cache: CityCache,
    origin_city_id: String,
}

/// Total parcel weight in grams, rounded half up.
pub fn order_weight_grams(details: &OrderDetails) -> Option<i32> {
    let kilograms = details
        .items
        .iter()
        .fold(BigDecimal::zero(), |acc, (item, product)| {
            acc + &product.weight * BigDecimal::from(item.quantity)
        });

    (kilograms * BigDecimal::from(1000))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i32()
}

impl ShippingService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        addresses: Arc<dyn AddressRepository>,
        shipments: Arc<dyn ShipmentRepository>,
        rates: Arc<dyn ShippingRateClient>,
        cache: CityCache,
        origin_city_id: String,
    ) -> Self {
        ShippingService {
            orders,
            addresses,
            shipments,
            rates,
            cache,
            origin_city_id,
        }
    }

    /// Resolves the rate API city id for a city and province, consulting
    /// the cache first.
    pub async fn resolve_city_id(
        &self,
        city: &str,
        province: &str,
    ) -> Result<String, ShippingServiceError> {
        let key = CityCache::key(city, province);
        if let Some(city_id) = self.cache.get(&key) {
            tracing::debug!(key = %key, "City cache hit");
            return Ok(city_id);
        }

        let city_name = city.trim();
        let province = province.trim();
        let found = self
            .rates
            .search_cities(city_name)
            .await?
            .into_iter()
            .find(|c| {
                c.city_name.eq_ignore_ascii_case(city_name)
                    && c.province.eq_ignore_ascii_case(province)
            })
            .ok_or_else(|| ShippingServiceError::CityNotFound(format!("{city_name}, {province}")))?;

        self.cache.insert(key, found.city_id.clone());
        Ok(found.city_id)
    }

    /// Prices the order with the rate API and records a shipment for it.
    ///
    /// When the requested service is not offered the courier's first
    /// service is used instead.
    pub async fn create_shipment(
        &self,
        order_id: i32,
        courier: &str,
        service: &str,
    ) -> Result<Shipment, ShippingServiceError> {
        let courier = courier.trim().to_lowercase();
        if courier.is_empty() {
            return Err(ShippingServiceError::InvalidInput(
                "Courier is required".to_string(),
            ));
        }

        let details = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or(ShippingServiceError::OrderNotFound)?;

        if details.order.status() == Some(OrderStatus::Cancelled) {
            return Err(ShippingServiceError::OrderCancelled);
        }

        if self.shipments.get_by_order_id(order_id).await?.is_some() {
            return Err(ShippingServiceError::ShipmentExists);
        }

        let address = self
            .addresses
            .get_by_id(details.order.address_id)
            .await?
            .ok_or(ShippingServiceError::AddressNotFound)?;

        let weight = order_weight_grams(&details).ok_or_else(|| {
            ShippingServiceError::InvalidInput("Order weight is out of range".to_string())
        })?;

        let destination = self.resolve_city_id(&address.city, &address.state).await?;

        let request = CostRequest {
            origin: self.origin_city_id.clone(),
            destination: destination.clone(),
            weight,
            courier: courier.clone(),
        };
        let results = self.rates.get_costs(&request).await?;

        let costs = results
            .into_iter()
            .next()
            .map(|r| r.costs)
            .unwrap_or_default();

        let selected = costs
            .iter()
            .find(|c| c.service.eq_ignore_ascii_case(service.trim()))
            .or_else(|| costs.first())
            .ok_or(ShippingServiceError::NoRatesAvailable)?;

        let price = selected
            .cost
            .first()
            .ok_or(ShippingServiceError::NoRatesAvailable)?;

        let shipment = self
            .shipments
            .add(NewShipment {
                order_id,
                origin_city: self.origin_city_id.clone(),
                destination_city: destination,
                weight,
                courier,
                service: selected.service.clone(),
                cost: BigDecimal::from(price.value),
                etd: price.etd.clone(),
                status: ShipmentStatus::Created.as_str().to_string(),
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ShippingServiceError::ShipmentExists
                } else {
                    e.into()
                }
            })?;

        tracing::info!(
            shipment_id = shipment.shipment_id,
            order_id,
            service = %shipment.service,
            cost = %shipment.cost,
            "Shipment created"
        );

        Ok(shipment)
    }

    pub async fn get_all(&self) -> Result<Vec<Shipment>, ShippingServiceError> {
        Ok(self.shipments.get_all().await?)
    }

    pub async fn get_by_id(&self, shipment_id: i32) -> Result<Shipment, ShippingServiceError> {
        self.shipments
            .get_by_id(shipment_id)
            .await?
            .ok_or(ShippingServiceError::ShipmentNotFound)
    }

    /// Advances the shipment status and/or sets the tracking number.
    pub async fn update(
        &self,
        shipment_id: i32,
        status: Option<&str>,
        tracking_number: Option<String>,
    ) -> Result<Shipment, ShippingServiceError> {
        let current = self.get_by_id(shipment_id).await?;
        let mut form = UpdateShipment {
            tracking_number,
            ..UpdateShipment::default()
        };

        if let Some(value) = status {
            let next = value
                .parse::<ShipmentStatus>()
                .map_err(|_| ShippingServiceError::InvalidStatus(value.to_string()))?;

            let from = current.status();
            if from != Some(next) {
                if !from.is_some_and(|s| s.can_transition_to(next)) {
                    return Err(ShippingServiceError::InvalidStatusTransition {
                        from: current.status.clone(),
                        to: next.as_str().to_string(),
                    });
                }

                let now = chrono::Utc::now().naive_utc();
                match next {
                    ShipmentStatus::Shipped => form.shipped_at = Some(now),
                    ShipmentStatus::Delivered => form.delivered_at = Some(now),
                    _ => {}
                }
                form.status = Some(next.as_str().to_string());
            }
        }

        self.shipments
            .update(shipment_id, form)
            .await?
            .ok_or(ShippingServiceError::ShipmentNotFound)
    }

    pub async fn delete(&self, shipment_id: i32) -> Result<(), ShippingServiceError> {
        if !self.shipments.delete(shipment_id).await? {
            return Err(ShippingServiceError::ShipmentNotFound);
        }
        Ok(())
    }
}
