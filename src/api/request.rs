use crate::api::errors::APIErrors;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// Field-level checks on a request body, run before the handler.
pub trait ValidateRequest {
    fn validate(&self) -> Result<(), String>;
}

/// `Json<T>` that rejects malformed or invalid bodies with a 400.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidateRequest,
    S: Send + Sync,
{
    type Rejection = APIErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| APIErrors::ValidationError(rejection.body_text()))?;

        value.validate().map_err(APIErrors::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

pub fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

pub fn max_len(value: &str, field: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

pub fn min_len(value: &str, field: &str, min: usize) -> Result<(), String> {
    if value.trim().chars().count() < min {
        return Err(format!("{field} must be at least {min} characters"));
    }
    Ok(())
}
