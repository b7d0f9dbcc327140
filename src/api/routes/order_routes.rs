use crate::api::controllers::order_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(order_controller::get_all_orders).post(order_controller::place_order),
        )
        .route(
            "/{id}",
            get(order_controller::get_order_by_id)
                .put(order_controller::update_order)
                .delete(order_controller::delete_order),
        )
        .route("/{id}/cancel", post(order_controller::cancel_order))
        .route("/user/{user_id}", get(order_controller::get_user_orders))
}
