mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bigdecimal::BigDecimal;
use common::{TestApp, checkout_fixture, dec};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storefront_lib::api::server::build_router;
use tower::ServiceExt;

fn app(test_app: &TestApp) -> Router {
    build_router(test_app.state.clone()).expect("Router should build")
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Decimals may be rendered as strings or numbers.
fn amount(value: &Value) -> BigDecimal {
    match value {
        Value::String(s) => dec(s),
        other => dec(&other.to_string()),
    }
}

#[tokio::test]
async fn test_place_order_requires_login() {
    let test_app = TestApp::new();

    let response = app(&test_app)
        .oneshot(request(
            "POST",
            "/api/orders",
            None,
            Some(json!({ "address_id": 1 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_place_order_success() {
    let test_app = TestApp::new();
    let fx = checkout_fixture(&test_app).await;
    let token = test_app.token_for(&fx.buyer);

    let response = app(&test_app)
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({ "address_id": fx.address.address_id })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(amount(&body["total"]), dec("250"));
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_place_order_with_empty_cart() {
    let test_app = TestApp::new();
    let buyer = test_app.user("Sari", "sari@example.com").await;
    let address = test_app.address(buyer.user_id).await;
    let token = test_app.token_for(&buyer);

    let response = app(&test_app)
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({ "address_id": address.address_id })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "business_rule");
    assert_eq!(body["message"], "Cart is empty");
}

#[tokio::test]
async fn test_place_order_rejects_missing_address() {
    let test_app = TestApp::new();
    let fx = checkout_fixture(&test_app).await;
    let token = test_app.token_for(&fx.buyer);

    let response = app(&test_app)
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({ "discount_code": "SAVE10" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_get_all_orders_is_admin_only() {
    let test_app = TestApp::new();
    let fx = checkout_fixture(&test_app).await;
    let admin = test_app.admin().await;
    let router = app(&test_app);

    let forbidden = router
        .clone()
        .oneshot(request(
            "GET",
            "/api/orders",
            Some(&test_app.token_for(&fx.buyer)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = router
        .oneshot(request(
            "GET",
            "/api/orders",
            Some(&test_app.token_for(&admin)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_orders_are_private_to_their_owner() {
    let test_app = TestApp::new();
    let fx = checkout_fixture(&test_app).await;
    let stranger = test_app.user("Lina", "lina@example.com").await;
    let router = app(&test_app);

    let placed = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&test_app.token_for(&fx.buyer)),
            Some(json!({ "address_id": fx.address.address_id })),
        ))
        .await
        .unwrap();
    let order_id = json_body(placed).await["order_id"].as_i64().unwrap();

    let response = router
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/orders/{order_id}"),
            Some(&test_app.token_for(&stranger)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let cancel = router
        .oneshot(request(
            "POST",
            &format!("/api/orders/{order_id}/cancel"),
            Some(&test_app.token_for(&fx.buyer)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(cancel.status(), StatusCode::OK);
    assert_eq!(json_body(cancel).await["status"], "CANCELLED");
    assert_eq!(test_app.stock_of(fx.product_b).await, 1);
}

#[tokio::test]
async fn test_cart_then_checkout_over_http() {
    let test_app = TestApp::new();
    let buyer = test_app.user("Budi", "budi@example.com").await;
    let address = test_app.address(buyer.user_id).await;
    let category = test_app.category("Apparel").await;
    let product = test_app.product(category, "Canvas Tote", "100", 5).await;
    let token = test_app.token_for(&buyer);
    let router = app(&test_app);

    let added = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/carts",
            Some(&token),
            Some(json!({ "product_id": product, "quantity": 2 })),
        ))
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::CREATED);

    let too_many = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/carts",
            Some(&token),
            Some(json!({ "product_id": product, "quantity": 6 })),
        ))
        .await
        .unwrap();
    assert_eq!(too_many.status(), StatusCode::BAD_REQUEST);

    let placed = router
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({ "address_id": address.address_id })),
        ))
        .await
        .unwrap();
    assert_eq!(placed.status(), StatusCode::CREATED);
    assert_eq!(amount(&json_body(placed).await["total"]), dec("200"));
    assert_eq!(test_app.stock_of(product).await, 3);
}
