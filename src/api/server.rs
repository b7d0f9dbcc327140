use crate::api::config::Config;
use crate::api::routes::{
    address_routes, auth_routes, cart_routes, category_routes, discount_routes, order_routes,
    product_routes, shipping_routes, user_routes, wishlist_routes,
};
use crate::api::state::{AppState, Repositories};
use crate::data::database::{Database, DatabaseSetupError};
use crate::services::mailer::LogMailer;
use crate::services::rate_client::{HttpRateClient, RateApiError};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseSetupError),
    #[error("shipping client setup failed: {0}")]
    RateClient(#[from] RateApiError),
    #[error("invalid CORS origin: {0}")]
    CorsOrigin(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn cors_layer(config: &Config) -> Result<CorsLayer, ServerError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    // Credentialed requests need an explicit origin
    match config.cors_origin.as_deref() {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|_| ServerError::CorsOrigin(origin.to_string()))?;
            Ok(layer
                .allow_origin(origin)
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true))
        }
        None => Ok(layer.allow_origin(Any).allow_headers(Any)),
    }
}

/// The full HTTP surface for the given state.
pub fn build_router(state: AppState) -> Result<Router, ServerError> {
    let cors = cors_layer(&state.config)?;
    let images = ServeDir::new(&state.config.upload_dir);

    let api = Router::new()
        .route("/", get(|| async { "Storefront Server API is running!" }))
        .nest("/addresses", address_routes::routes())
        .nest("/auth", auth_routes::routes())
        .nest("/carts", cart_routes::routes())
        .nest("/categories", category_routes::routes())
        .nest("/discounts", discount_routes::routes())
        .nest("/orders", order_routes::routes())
        .nest("/products", product_routes::routes())
        .nest("/shippings", shipping_routes::routes())
        .nest("/users", user_routes::routes())
        .nest("/wishlists", wishlist_routes::routes());

    Ok(Router::new()
        .nest("/api", api)
        .nest_service("/images", images)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Wires MySQL, the rate API client and the log mailer, then serves until
/// the process is stopped.
pub async fn start(config: Config) -> Result<(), ServerError> {
    let db = Database::new(&config.database_url)?;
    let rates = Arc::new(HttpRateClient::new(&config.shipping)?);
    let bind_address = config.bind_address.clone();

    let state = AppState::new(
        config,
        Repositories::mysql(&db),
        rates,
        Arc::new(LogMailer),
    );
    let router = build_router(state)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
