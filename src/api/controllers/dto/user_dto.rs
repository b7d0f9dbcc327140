use crate::api::request::ValidateRequest;
use crate::api::response::timestamp;
use crate::data::models::user::User;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: timestamp(user.created_at),
            updated_at: timestamp(user.updated_at),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl ValidateRequest for UpdateUserRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_none() && self.email.is_none() && self.password.is_none() && self.role.is_none()
        {
            return Err("Nothing to update".to_string());
        }
        Ok(())
    }
}
