use crate::api::controllers::dto::order_dto::{
    OrderResponse, PlaceOrderRequest, UpdateOrderRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::{AdminClaims, ensure_access};
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Place an order from the caller's cart
pub async fn place_order(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PlaceOrderRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let details = state.orders.place_order(claims.sub, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(details))))
}

/// Get all orders
pub async fn get_all_orders(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let orders = state.orders.get_all().await?;
    let response: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(response))
}

/// Get order by ID
pub async fn get_order_by_id(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let details = state.orders.get_by_id(order_id).await?;
    ensure_access(&claims, details.order.user_id)?;
    Ok(Json(OrderResponse::from(details)))
}

/// Get orders of a user
pub async fn get_user_orders(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    let orders = state.orders.get_by_user_id(user_id).await?;
    let response: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(response))
}

pub async fn update_order(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    state
        .orders
        .update_order(order_id, payload.address_id, payload.status.as_deref())
        .await?;

    let details = state.orders.get_by_id(order_id).await?;
    Ok(Json(OrderResponse::from(details)))
}

pub async fn cancel_order(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let current = state.orders.get_by_id(order_id).await?;
    ensure_access(&claims, current.order.user_id)?;

    state.orders.cancel_order(order_id).await?;

    let details = state.orders.get_by_id(order_id).await?;
    Ok(Json(OrderResponse::from(details)))
}

/// Delete an order and return its items to stock
pub async fn delete_order(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let current = state.orders.get_by_id(order_id).await?;
    ensure_access(&claims, current.order.user_id)?;

    state.orders.delete_order(order_id).await?;
    Ok(Json(MessageResponse::new("Order deleted")))
}
