mod common;

use common::{FakeRates, TestApp, checkout_fixture, dec, service};
use storefront_lib::services::errors::ShippingServiceError;
use storefront_lib::services::order_service::PlaceOrder;

async fn placed_order(app: &TestApp) -> i32 {
    let fx = checkout_fixture(app).await;
    app.state
        .orders
        .place_order(
            fx.buyer.user_id,
            PlaceOrder {
                address_id: fx.address.address_id,
                discount_code: None,
            },
        )
        .await
        .expect("Order should be placed")
        .order
        .order_id
}

#[tokio::test]
async fn test_create_shipment_with_requested_service() {
    let app = TestApp::new();
    let order_id = placed_order(&app).await;

    let shipment = app
        .state
        .shipping
        .create_shipment(order_id, "JNE", "reg")
        .await
        .expect("Shipment should be created");

    assert_eq!(shipment.courier, "jne");
    assert_eq!(shipment.service, "REG");
    assert_eq!(shipment.cost, dec("22000"));
    assert_eq!(shipment.etd, "1-2");
    assert_eq!(shipment.status, "CREATED");
    assert_eq!(shipment.destination_city, "23");

    // 3 items at 0.5 kg each
    let request = app.rates.last_request().unwrap();
    assert_eq!(request.weight, 1500);
    assert_eq!(request.origin, "178");
    assert_eq!(request.destination, "23");
}

#[tokio::test]
async fn test_unknown_service_falls_back_to_first() {
    let app = TestApp::new();
    let order_id = placed_order(&app).await;

    let shipment = app
        .state
        .shipping
        .create_shipment(order_id, "jne", "YES")
        .await
        .unwrap();

    assert_eq!(shipment.service, "OKE");
    assert_eq!(shipment.cost, dec("18000"));
}

#[tokio::test]
async fn test_one_shipment_per_order() {
    let app = TestApp::new();
    let order_id = placed_order(&app).await;

    app.state
        .shipping
        .create_shipment(order_id, "jne", "REG")
        .await
        .unwrap();

    assert!(matches!(
        app.state.shipping.create_shipment(order_id, "jne", "REG").await,
        Err(ShippingServiceError::ShipmentExists)
    ));
    assert!(matches!(
        app.state.shipping.create_shipment(9999, "jne", "REG").await,
        Err(ShippingServiceError::OrderNotFound)
    ));
}

#[tokio::test]
async fn test_cancelled_order_cannot_ship() {
    let app = TestApp::new();
    let order_id = placed_order(&app).await;
    app.state.orders.cancel_order(order_id).await.unwrap();

    assert!(matches!(
        app.state.shipping.create_shipment(order_id, "jne", "REG").await,
        Err(ShippingServiceError::OrderCancelled)
    ));
    assert!(app.state.shipping.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_city_lookup_is_cached() {
    let app = TestApp::new();

    let first = app
        .state
        .shipping
        .resolve_city_id("bandung", "jawa barat")
        .await
        .unwrap();
    let second = app
        .state
        .shipping
        .resolve_city_id(" Bandung ", "Jawa Barat")
        .await
        .unwrap();

    assert_eq!(first, "23");
    assert_eq!(second, "23");
    assert_eq!(app.rates.city_calls(), 1);

    assert!(matches!(
        app.state.shipping.resolve_city_id("Bandung", "Bali").await,
        Err(ShippingServiceError::CityNotFound(_))
    ));
}

#[tokio::test]
async fn test_no_rates_available() {
    let app = TestApp::with_rates(FakeRates {
        services: Vec::new(),
        ..FakeRates::standard()
    });
    let order_id = placed_order(&app).await;

    assert!(matches!(
        app.state.shipping.create_shipment(order_id, "jne", "REG").await,
        Err(ShippingServiceError::NoRatesAvailable)
    ));
    assert!(app.state.shipping.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_without_cost_values() {
    let mut empty = service("REG", 0, "");
    empty.cost.clear();
    let app = TestApp::with_rates(FakeRates {
        services: vec![empty],
        ..FakeRates::standard()
    });
    let order_id = placed_order(&app).await;

    assert!(matches!(
        app.state.shipping.create_shipment(order_id, "jne", "REG").await,
        Err(ShippingServiceError::NoRatesAvailable)
    ));
}

#[tokio::test]
async fn test_shipment_status_flow() {
    let app = TestApp::new();
    let order_id = placed_order(&app).await;
    let shipment = app
        .state
        .shipping
        .create_shipment(order_id, "jne", "REG")
        .await
        .unwrap();
    let id = shipment.shipment_id;

    let skipped = app.state.shipping.update(id, Some("DELIVERED"), None).await;
    assert!(matches!(
        skipped,
        Err(ShippingServiceError::InvalidStatusTransition { .. })
    ));

    let shipped = app
        .state
        .shipping
        .update(id, Some("shipped"), Some("JNE123".to_string()))
        .await
        .unwrap();
    assert_eq!(shipped.status, "SHIPPED");
    assert_eq!(shipped.tracking_number.as_deref(), Some("JNE123"));
    assert!(shipped.shipped_at.is_some());

    let delivered = app
        .state
        .shipping
        .update(id, Some("DELIVERED"), None)
        .await
        .unwrap();
    assert!(delivered.delivered_at.is_some());

    app.state.shipping.delete(id).await.unwrap();
    assert!(matches!(
        app.state.shipping.get_by_id(id).await,
        Err(ShippingServiceError::ShipmentNotFound)
    ));
}
