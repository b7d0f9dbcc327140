use crate::api::controllers::dto::user_dto::UserResponse;
use crate::api::request::{ValidateRequest, require};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ValidateRequest for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ValidateRequest for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ValidateRequest for ForgotPasswordRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.email, "email")
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub email: String,
    pub password: String,
}

impl ValidateRequest for ResetPasswordRequest {
    fn validate(&self) -> Result<(), String> {
        require(&self.token, "token")?;
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}
