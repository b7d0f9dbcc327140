use crate::api::controllers::dto::product_dto::{
    CreateProductRequest, ProductResponse, UpdateProductRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::AdminClaims;
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::data::models::product::ProductDetails;
use crate::services::product_service::UploadedImage;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

fn to_response(state: &AppState, details: ProductDetails) -> ProductResponse {
    ProductResponse::from_details(details, |name| state.image_url(name))
}

fn to_responses(state: &AppState, list: Vec<ProductDetails>) -> Vec<ProductResponse> {
    list.into_iter().map(|d| to_response(state, d)).collect()
}

/// Get all products
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, APIErrors> {
    let products = state.products.get_all().await?;
    Ok(Json(to_responses(&state, products)))
}

/// Get product by ID
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    let product = state.products.get_by_id(product_id).await?;
    Ok(Json(to_response(&state, product)))
}

pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, APIErrors> {
    let product = state.products.get_by_slug(&slug).await?;
    Ok(Json(to_response(&state, product)))
}

/// Products of the category with the given slug
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, APIErrors> {
    let products = state.products.get_by_category_slug(&slug).await?;
    Ok(Json(to_responses(&state, products)))
}

pub async fn create_product(
    _: AdminClaims,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let product = state.products.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(to_response(&state, product))))
}

pub async fn update_product(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let product = state.products.update(product_id, payload.into()).await?;
    Ok(Json(to_response(&state, product)))
}

pub async fn delete_product(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, APIErrors> {
    state.products.delete(product_id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

/// Replace the product's images with the uploaded files
pub async fn upload_product_images(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, APIErrors> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| APIErrors::ValidationError(e.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| APIErrors::ValidationError(e.body_text()))?;

        uploads.push(UploadedImage {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let product = state.products.upload_images(product_id, uploads).await?;
    Ok(Json(to_response(&state, product)))
}
