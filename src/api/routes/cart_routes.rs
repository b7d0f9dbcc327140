use crate::api::controllers::cart_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{delete, get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cart_controller::get_my_cart)
                .post(cart_controller::add_to_cart)
                .put(cart_controller::update_cart_item),
        )
        .route("/all", get(cart_controller::get_all_carts))
        .route("/user/{user_id}", get(cart_controller::get_user_cart))
        .route("/{id}", delete(cart_controller::remove_cart_item))
}
