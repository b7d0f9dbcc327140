use crate::api::controllers::product_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

/// Upper bound for one image upload request.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product_controller::get_all_products).post(product_controller::create_product),
        )
        .route(
            "/{id}",
            get(product_controller::get_product_by_id)
                .put(product_controller::update_product)
                .delete(product_controller::delete_product),
        )
        .route(
            "/{id}/images",
            post(product_controller::upload_product_images)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/slug/{slug}", get(product_controller::get_product_by_slug))
        .route("/category/{slug}", get(product_controller::get_products_by_category))
}
