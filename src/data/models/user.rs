use crate::data::models::schema::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Unknown role strings are treated as a regular shopper.
    pub fn role(&self) -> UserRole {
        self.role.parse().unwrap_or(UserRole::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
}

/// Sets or clears the password reset token pair.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct ResetTokenChange {
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err("Unknown role"),
        }
    }
}
