use crate::api::controllers::dto::discount_dto::{
    CreateDiscountRequest, DiscountResponse, UpdateDiscountRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::AdminClaims;
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn get_all_discounts(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let discounts = state.discounts.get_all().await?;
    let response: Vec<DiscountResponse> =
        discounts.into_iter().map(DiscountResponse::from).collect();
    Ok(Json(response))
}

pub async fn get_discount_by_id(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(discount_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let discount = state.discounts.get_by_id(discount_id).await?;
    Ok(Json(DiscountResponse::from(discount)))
}

/// Look up a code before checkout
pub async fn get_discount_by_code(
    _: AccessClaims,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, APIErrors> {
    let discount = state.discounts.get_by_code(&code).await?;
    Ok(Json(DiscountResponse::from(discount)))
}

pub async fn create_discount(
    _: AdminClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDiscountRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let discount = state.discounts.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(DiscountResponse::from(discount))))
}

pub async fn update_discount(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(discount_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateDiscountRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let discount = state.discounts.update(discount_id, payload.into()).await?;
    Ok(Json(DiscountResponse::from(discount)))
}

pub async fn delete_discount(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(discount_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    state.discounts.delete(discount_id).await?;
    Ok(Json(MessageResponse::new("Discount deleted")))
}
