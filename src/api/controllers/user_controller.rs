use crate::api::controllers::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::api::errors::APIErrors;
use crate::api::extractors::{AdminClaims, ensure_access};
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// Get all users
pub async fn get_all_users(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let users = state.users.get_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// Get user by ID
pub async fn get_user_by_id(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    let user = state.users.get_by_id(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    let user = state
        .users
        .update(user_id, payload.into(), claims.is_admin())
        .await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    state.users.delete(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
