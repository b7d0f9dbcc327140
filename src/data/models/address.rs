use crate::data::models::schema::*;
use crate::data::models::user::User;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = addresses)]
#[diesel(primary_key(address_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Address {
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
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = addresses)]
pub struct NewAddress {
    pub user_id: i32,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub phone: String,
    pub address_type: String,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = addresses)]
pub struct UpdateAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub address_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressType {
    Home,
    Office,
    Other,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Home => "HOME",
            AddressType::Office => "OFFICE",
            AddressType::Other => "OTHER",
        }
    }
}

impl FromStr for AddressType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOME" => Ok(AddressType::Home),
            "OFFICE" => Ok(AddressType::Office),
            "OTHER" => Ok(AddressType::Other),
            _ => Err("Unknown address type"),
        }
    }
}
