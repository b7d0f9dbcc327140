use crate::api::controllers::dto::cart_dto::{CartItemRequest, CartItemResponse, CartResponse};
use crate::api::errors::APIErrors;
use crate::api::extractors::{AdminClaims, ensure_access};
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Add a product to the caller's cart, or overwrite its quantity
pub async fn add_to_cart(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CartItemRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let (item, created) = state
        .carts
        .add_or_update(claims.sub, payload.product_id, payload.quantity)
        .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(CartItemResponse::from(item))))
}

/// Set the quantity of a line; zero removes it
pub async fn update_cart_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CartItemRequest>,
) -> Result<Response, APIErrors> {
    let updated = state
        .carts
        .update_quantity(claims.sub, payload.product_id, payload.quantity)
        .await?;

    Ok(match updated {
        Some(item) => Json(CartItemResponse::from(item)).into_response(),
        None => Json(MessageResponse::new("Cart item removed")).into_response(),
    })
}

pub async fn get_my_cart(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let entries = state.carts.get_user_cart(claims.sub).await?;
    Ok(Json(CartResponse::from_entries(entries, |name| state.image_url(name))))
}

pub async fn get_user_cart(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    let entries = state.carts.get_user_cart(user_id).await?;
    Ok(Json(CartResponse::from_entries(entries, |name| state.image_url(name))))
}

pub async fn get_all_carts(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let entries = state.carts.get_all_carts().await?;
    Ok(Json(CartResponse::from_entries(entries, |name| state.image_url(name))))
}

pub async fn remove_cart_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(cart_item_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let item = state.carts.get_item(cart_item_id).await?;
    ensure_access(&claims, item.user_id)?;

    state.carts.remove_item(cart_item_id).await?;
    Ok(Json(MessageResponse::new("Cart item removed")))
}
