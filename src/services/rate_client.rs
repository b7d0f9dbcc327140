//! Client for the RajaOngkir-style shipping rate API.
//!
//! Both endpoints wrap their payload as `{"rajaongkir": {"results": ...}}`
//! and authenticate with a `key` header.

use crate::api::config::ShippingConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RateApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("rate API returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    pub city_id: String,
    pub city_name: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRequest {
    pub origin: String,
    pub destination: String,
    /// Grams
    pub weight: i32,
    pub courier: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourierCosts {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub costs: Vec<ServiceCost>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceCost {
    pub service: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: Vec<CostValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostValue {
    pub value: i64,
    #[serde(default)]
    pub etd: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    rajaongkir: Results<T>,
}

#[derive(Deserialize)]
struct Results<T> {
    results: T,
}

#[async_trait]
pub trait ShippingRateClient: Send + Sync {
    async fn search_cities(&self, city_name: &str) -> Result<Vec<City>, RateApiError>;
    async fn get_costs(&self, request: &CostRequest) -> Result<Vec<CourierCosts>, RateApiError>;
}

pub struct HttpRateClient {
    client: Client,
    api_key: String,
    cost_url: String,
    city_url: String,
}

impl HttpRateClient {
    pub fn new(config: &ShippingConfig) -> Result<Self, RateApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(HttpRateClient {
            client,
            api_key: config.api_key.clone(),
            cost_url: config.cost_url.clone(),
            city_url: config.city_url.clone(),
        })
    }

    async fn read_results<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RateApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RateApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.rajaongkir.results)
    }
}

#[async_trait]
impl ShippingRateClient for HttpRateClient {
    async fn search_cities(&self, city_name: &str) -> Result<Vec<City>, RateApiError> {
        let response = self
            .client
            .get(&self.city_url)
            .header("key", &self.api_key)
            .query(&[("city_name", city_name)])
            .send()
            .await?;

        Self::read_results(response).await
    }

    async fn get_costs(&self, request: &CostRequest) -> Result<Vec<CourierCosts>, RateApiError> {
        tracing::debug!(
            origin = %request.origin,
            destination = %request.destination,
            weight = request.weight,
            courier = %request.courier,
            "Requesting shipping costs"
        );

        let response = self
            .client
            .post(&self.cost_url)
            .header("key", &self.api_key)
            .json(request)
            .send()
            .await?;

        Self::read_results(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cost_envelope() {
        let body = r#"{
            "rajaongkir": {
                "results": [{
                    "code": "jne",
                    "name": "Jalur Nugraha Ekakurir (JNE)",
                    "costs": [
                        {"service": "OKE", "description": "Ongkos Kirim Ekonomis",
                         "cost": [{"value": 38000, "etd": "4-5", "note": ""}]},
                        {"service": "REG", "description": "Layanan Reguler",
                         "cost": [{"value": 44000, "etd": "2-3", "note": ""}]}
                    ]
                }]
            }
        }"#;

        let envelope: Envelope<Vec<CourierCosts>> = serde_json::from_str(body).unwrap();
        let results = envelope.rajaongkir.results;

        assert_eq!(results[0].code, "jne");
        assert_eq!(results[0].costs[1].service, "REG");
        assert_eq!(results[0].costs[1].cost[0].value, 44000);
    }

    #[test]
    fn parses_city_envelope() {
        let body = r#"{"rajaongkir": {"results": [
            {"city_id": "444", "province_id": "11", "province": "Jawa Timur",
             "type": "Kota", "city_name": "Surabaya", "postal_code": "60119"}
        ]}}"#;

        let envelope: Envelope<Vec<City>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.rajaongkir.results[0].city_id, "444");
    }
}
