use crate::api::controllers::dto::address_dto::{
    AddressResponse, CreateAddressRequest, UpdateAddressRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::{AdminClaims, ensure_access};
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::data::models::address::Address;
use crate::security::jwt::AccessClaims;
use crate::utils::mappers::new_address;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

fn to_response(addresses: Vec<Address>) -> Vec<AddressResponse> {
    addresses.into_iter().map(AddressResponse::from).collect()
}

/// Create an address for the caller
pub async fn create_address(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAddressRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let address = state
        .addresses
        .create(new_address(claims.sub, payload))
        .await?;
    Ok((StatusCode::CREATED, Json(AddressResponse::from(address))))
}

pub async fn get_all_addresses(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    Ok(Json(to_response(state.addresses.get_all().await?)))
}

pub async fn get_address_by_id(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let address = state.addresses.get_by_id(address_id).await?;
    ensure_access(&claims, address.user_id)?;
    Ok(Json(AddressResponse::from(address)))
}

pub async fn get_user_addresses(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    Ok(Json(to_response(state.addresses.get_by_user_id(user_id).await?)))
}

pub async fn update_address(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateAddressRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let current = state.addresses.get_by_id(address_id).await?;
    ensure_access(&claims, current.user_id)?;

    let address = state.addresses.update(address_id, payload.into()).await?;
    Ok(Json(AddressResponse::from(address)))
}

pub async fn delete_address(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let current = state.addresses.get_by_id(address_id).await?;
    ensure_access(&claims, current.user_id)?;

    state.addresses.delete(address_id).await?;
    Ok(Json(MessageResponse::new("Address deleted")))
}
