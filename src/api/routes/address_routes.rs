use crate::api::controllers::address_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(address_controller::get_all_addresses).post(address_controller::create_address),
        )
        .route(
            "/{id}",
            get(address_controller::get_address_by_id)
                .put(address_controller::update_address)
                .delete(address_controller::delete_address),
        )
        .route("/user/{user_id}", get(address_controller::get_user_addresses))
}
