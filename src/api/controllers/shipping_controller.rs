use crate::api::controllers::dto::shipping_dto::{
    CreateShipmentRequest, ShipmentResponse, UpdateShipmentRequest,
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

/// Price an order with the courier and record its shipment
pub async fn create_shipment(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateShipmentRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let order = state.orders.get_by_id(payload.order_id).await?;
    ensure_access(&claims, order.order.user_id)?;

    let shipment = state
        .shipping
        .create_shipment(payload.order_id, &payload.courier, &payload.service)
        .await?;
    Ok((StatusCode::CREATED, Json(ShipmentResponse::from(shipment))))
}

pub async fn get_all_shipments(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let shipments = state.shipping.get_all().await?;
    let response: Vec<ShipmentResponse> =
        shipments.into_iter().map(ShipmentResponse::from).collect();
    Ok(Json(response))
}

pub async fn get_shipment_by_id(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(shipment_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let shipment = state.shipping.get_by_id(shipment_id).await?;
    let order = state.orders.get_by_id(shipment.order_id).await?;
    ensure_access(&claims, order.order.user_id)?;

    Ok(Json(ShipmentResponse::from(shipment)))
}

pub async fn update_shipment(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(shipment_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateShipmentRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let shipment = state
        .shipping
        .update(shipment_id, payload.status.as_deref(), payload.tracking_number)
        .await?;
    Ok(Json(ShipmentResponse::from(shipment)))
}

pub async fn delete_shipment(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(shipment_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    state.shipping.delete(shipment_id).await?;
    Ok(Json(MessageResponse::new("Shipment deleted")))
}
