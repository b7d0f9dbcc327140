use crate::api::controllers::auth_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth_controller::register))
        .route("/login", post(auth_controller::login))
        .route("/logout", post(auth_controller::logout))
        .route("/forgot-password", post(auth_controller::forgot_password))
        .route("/reset-password", post(auth_controller::reset_password))
}
