use crate::api::request::{ValidateRequest, max_len, require};
use crate::api::response::timestamp;
use crate::data::models::address::Address;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

fn default_address_type() -> String {
    "HOME".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateAddressRequest {
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub phone: String,
    #[serde(default = "default_address_type")]
    pub address_type: String,
}

impl ValidateRequest for CreateAddressRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.address1, "address1")?;
        max_len(&self.address1, "address1", 100)?;
        if let Some(address2) = &self.address2 {
            max_len(address2, "address2", 100)?;
        }
        require(&self.city, "city")?;
        max_len(&self.city, "city", 20)?;
        require(&self.state, "state")?;
        require(&self.country, "country")?;
        require(&self.postal_code, "postal_code")?;
        require(&self.phone, "phone")
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateAddressRequest {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub address_type: Option<String>,
}

impl ValidateRequest for UpdateAddressRequest {
    fn validate(&self) -> Result<(), String> {
        let required = [
            (&self.address1, "address1"),
            (&self.city, "city"),
            (&self.state, "state"),
            (&self.country, "country"),
            (&self.postal_code, "postal_code"),
            (&self.phone, "phone"),
        ];
        for (value, field) in required {
            if let Some(value) = value {
                require(value, field)?;
            }
        }
        if let Some(address1) = &self.address1 {
            max_len(address1, "address1", 100)?;
        }
        if let Some(city) = &self.city {
            max_len(city, "city", 20)?;
        }
        Ok(())
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AddressResponse {
    pub address_id: i32,
    pub user_id: i32,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub phone: String,
    pub address_type: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        AddressResponse {
            address_id: address.address_id,
            user_id: address.user_id,
            address1: address.address1,
            address2: address.address2,
            city: address.city,
            state: address.state,
            country: address.country,
            postal_code: address.postal_code,
            phone: address.phone,
            address_type: address.address_type,
            created_at: timestamp(address.created_at),
            updated_at: timestamp(address.updated_at),
        }
    }
}
