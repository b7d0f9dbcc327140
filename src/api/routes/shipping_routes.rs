use crate::api::controllers::shipping_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shipping_controller::get_all_shipments).post(shipping_controller::create_shipment),
        )
        .route(
            "/{id}",
            get(shipping_controller::get_shipment_by_id)
                .put(shipping_controller::update_shipment)
                .delete(shipping_controller::delete_shipment),
        )
}
