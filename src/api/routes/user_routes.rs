use crate::api::controllers::user_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(user_controller::get_all_users))
        .route(
            "/{id}",
            get(user_controller::get_user_by_id)
                .put(user_controller::update_user)
                .delete(user_controller::delete_user),
        )
}
