use crate::api::controllers::dto::wishlist_dto::{AddWishlistRequest, WishlistItemResponse};
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

pub async fn get_all_wishlists(
    _: AdminClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let rows = state.wishlists.get_all().await?;
    let response: Vec<WishlistItemResponse> =
        rows.into_iter().map(WishlistItemResponse::from).collect();
    Ok(Json(response))
}

pub async fn add_to_wishlist(
    claims: AccessClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddWishlistRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let row = state.wishlists.add(claims.sub, payload.product_id).await?;
    Ok((StatusCode::CREATED, Json(WishlistItemResponse::from(row))))
}

pub async fn get_wishlist_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(wishlist_item_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let row = state.wishlists.get_by_id(wishlist_item_id).await?;
    ensure_access(&claims, row.0.user_id)?;
    Ok(Json(WishlistItemResponse::from(row)))
}

pub async fn get_user_wishlist(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    ensure_access(&claims, user_id)?;
    let rows = state.wishlists.get_by_user_id(user_id).await?;
    let response: Vec<WishlistItemResponse> =
        rows.into_iter().map(WishlistItemResponse::from).collect();
    Ok(Json(response))
}

pub async fn remove_from_wishlist(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(wishlist_item_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let (item, _) = state.wishlists.get_by_id(wishlist_item_id).await?;
    ensure_access(&claims, item.user_id)?;

    state.wishlists.delete(wishlist_item_id).await?;
    Ok(Json(MessageResponse::new("Wishlist item removed")))
}
