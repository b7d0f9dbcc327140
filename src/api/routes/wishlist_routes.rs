use crate::api::controllers::wishlist_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(wishlist_controller::get_all_wishlists).post(wishlist_controller::add_to_wishlist),
        )
        .route(
            "/{id}",
            get(wishlist_controller::get_wishlist_item)
                .delete(wishlist_controller::remove_from_wishlist),
        )
        .route("/user/{user_id}", get(wishlist_controller::get_user_wishlist))
}
