use crate::api::controllers::category_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category_controller::get_all_categories).post(category_controller::create_category),
        )
        .route(
            "/{id}",
            get(category_controller::get_category_by_id)
                .put(category_controller::update_category)
                .delete(category_controller::delete_category),
        )
        .route("/slug/{slug}", get(category_controller::get_category_by_slug))
}
