use crate::api::controllers::dto::category_dto::{
    CategoryRequest, CategoryResponse, UpdateCategoryRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::AdminClaims;
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Get all categories
pub async fn get_all_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let categories = state.categories.get_all().await?;
    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(response))
}

pub async fn get_category_by_id(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let category = state.categories.get_by_id(category_id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, APIErrors> {
    let category = state.categories.get_by_slug(&slug).await?;
    Ok(Json(CategoryResponse::from(category)))
}

pub async fn create_category(
    _: AdminClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let category = state.categories.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

pub async fn update_category(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let category = state
        .categories
        .update(category_id, payload.name.as_deref())
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

pub async fn delete_category(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    state.categories.delete(category_id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
