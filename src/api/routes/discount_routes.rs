use crate::api::controllers::discount_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(discount_controller::get_all_discounts).post(discount_controller::create_discount),
        )
        .route(
            "/{id}",
            get(discount_controller::get_discount_by_id)
                .put(discount_controller::update_discount)
                .delete(discount_controller::delete_discount),
        )
        .route("/code/{code}", get(discount_controller::get_discount_by_code))
}
