mod common;

use common::{TestApp, checkout_fixture, dec};
use storefront_lib::services::errors::OrderServiceError;
use storefront_lib::services::order_service::PlaceOrder;
use storefront_lib::services::product_service::ChangeProduct;

fn place(address_id: i32, code: Option<&str>) -> PlaceOrder {
    PlaceOrder {
        address_id,
        discount_code: code.map(str::to_string),
    }
}

#[tokio::test]
async fn test_place_order_without_discount() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;

    let details = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .expect("Order should be placed");

    assert_eq!(details.order.total, dec("250"));
    assert_eq!(details.order.status, "PENDING");
    assert_eq!(details.order.discount_id, None);
    assert_eq!(details.items.len(), 2);
    assert_eq!(details.items[0].0.price, dec("100"));

    assert_eq!(app.stock_of(fx.product_a).await, 3);
    assert_eq!(app.stock_of(fx.product_b).await, 0);

    let cart = app.state.carts.get_user_cart(fx.buyer.user_id).await.unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_place_order_with_percentage_code() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let discount = app.discount("SAVE10", None).await;

    let details = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, Some(" SAVE10 ")))
        .await
        .expect("Order should be placed");

    assert_eq!(details.order.total, dec("225"));
    assert_eq!(details.order.discount_id, Some(discount.discount_id));

    let used = app.state.discounts.get_by_id(discount.discount_id).await.unwrap();
    assert_eq!(used.usage_count, 1);
}

#[tokio::test]
async fn test_empty_cart_changes_nothing() {
    let app = TestApp::new();
    let buyer = app.user("Sari", "sari@example.com").await;
    let address = app.address(buyer.user_id).await;

    let result = app
        .state
        .orders
        .place_order(buyer.user_id, place(address.address_id, None))
        .await;

    assert!(matches!(result, Err(OrderServiceError::EmptyCart)));
    assert!(app.state.orders.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_over_stock_line_rolls_back() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let discount = app.discount("SAVE10", None).await;

    // Stock drops after the line was added to the cart
    app.state
        .products
        .update(
            fx.product_b,
            ChangeProduct {
                stock: Some(0),
                ..ChangeProduct::default()
            },
        )
        .await
        .unwrap();

    let result = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, Some("SAVE10")))
        .await;

    match result {
        Err(OrderServiceError::InsufficientStock { product }) => assert_eq!(product, "Enamel Pin"),
        other => panic!("unexpected result: {other:?}"),
    }

    assert_eq!(app.stock_of(fx.product_a).await, 5);
    assert_eq!(app.state.carts.get_user_cart(fx.buyer.user_id).await.unwrap().len(), 2);
    let untouched = app.state.discounts.get_by_id(discount.discount_id).await.unwrap();
    assert_eq!(untouched.usage_count, 0);
    assert!(app.state.orders.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exhausted_code_is_rejected() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let discount = app.discount("ONCE", Some(1)).await;

    app.state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, Some("ONCE")))
        .await
        .expect("First use should succeed");

    app.add_to_cart(fx.buyer.user_id, fx.product_a, 1).await;
    let result = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, Some("ONCE")))
        .await;

    assert!(matches!(result, Err(OrderServiceError::DiscountExhausted)));
    let after = app.state.discounts.get_by_id(discount.discount_id).await.unwrap();
    assert_eq!(after.usage_count, 1);
    assert_eq!(app.stock_of(fx.product_a).await, 3);
}

#[tokio::test]
async fn test_unknown_code_and_foreign_address() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;

    let unknown = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, Some("NOPE")))
        .await;
    assert!(matches!(unknown, Err(OrderServiceError::DiscountNotFound)));

    let other = app.user("Lina", "lina@example.com").await;
    let their_address = app.address(other.user_id).await;
    let foreign = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(their_address.address_id, None))
        .await;
    assert!(matches!(foreign, Err(OrderServiceError::AddressNotFound)));

    assert_eq!(app.stock_of(fx.product_a).await, 5);
}

#[tokio::test]
async fn test_cancel_returns_stock_once() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let order = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order;

    let cancelled = app.state.orders.cancel_order(order.order_id).await.unwrap();
    assert_eq!(cancelled.status, "CANCELLED");
    assert_eq!(app.stock_of(fx.product_a).await, 5);
    assert_eq!(app.stock_of(fx.product_b).await, 1);

    let again = app.state.orders.cancel_order(order.order_id).await;
    assert!(matches!(
        again,
        Err(OrderServiceError::InvalidStatusTransition { .. })
    ));
    assert_eq!(app.stock_of(fx.product_a).await, 5);
}

#[tokio::test]
async fn test_status_update_rules() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let order_id = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    let accepted = app
        .state
        .orders
        .update_order(order_id, None, Some("accepted"))
        .await
        .unwrap();
    assert_eq!(accepted.status, "ACCEPTED");

    let backwards = app
        .state
        .orders
        .update_order(order_id, None, Some("PENDING"))
        .await;
    assert!(matches!(
        backwards,
        Err(OrderServiceError::InvalidStatusTransition { .. })
    ));

    let unknown = app
        .state
        .orders
        .update_order(order_id, None, Some("SHIPPED"))
        .await;
    assert!(matches!(unknown, Err(OrderServiceError::InvalidStatus(_))));

    let cancelled = app
        .state
        .orders
        .update_order(order_id, None, Some("CANCELLED"))
        .await
        .unwrap();
    assert_eq!(cancelled.status, "CANCELLED");
    assert_eq!(app.stock_of(fx.product_a).await, 5);
}

#[tokio::test]
async fn test_delete_restores_stock() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let order_id = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    app.state.orders.delete_order(order_id).await.unwrap();

    assert_eq!(app.stock_of(fx.product_a).await, 5);
    assert_eq!(app.stock_of(fx.product_b).await, 1);
    assert!(matches!(
        app.state.orders.get_by_id(order_id).await,
        Err(OrderServiceError::OrderNotFound)
    ));
    assert!(matches!(
        app.state.orders.delete_order(order_id).await,
        Err(OrderServiceError::OrderNotFound)
    ));
}

#[tokio::test]
async fn test_delete_after_cancel_keeps_stock_exact() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let order_id = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    app.state.orders.cancel_order(order_id).await.unwrap();
    app.state.orders.delete_order(order_id).await.unwrap();

    assert_eq!(app.stock_of(fx.product_a).await, 5);
    assert_eq!(app.stock_of(fx.product_b).await, 1);
}

#[tokio::test]
async fn test_cancel_with_unknown_address_changes_nothing() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let order_id = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    let result = app
        .state
        .orders
        .update_order(order_id, Some(9999), Some("CANCELLED"))
        .await;
    assert!(matches!(result, Err(OrderServiceError::AddressNotFound)));

    let order = app.state.orders.get_by_id(order_id).await.unwrap().order;
    assert_eq!(order.status, "PENDING");
    assert_eq!(order.address_id, fx.address.address_id);
    assert_eq!(app.stock_of(fx.product_a).await, 3);
    assert_eq!(app.stock_of(fx.product_b).await, 0);
}

#[tokio::test]
async fn test_cancel_and_move_address_together() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let other = app
        .address_in(fx.buyer.user_id, "Jakarta Barat", "DKI Jakarta")
        .await;
    let order_id = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    let updated = app
        .state
        .orders
        .update_order(order_id, Some(other.address_id), Some("CANCELLED"))
        .await
        .unwrap();

    assert_eq!(updated.status, "CANCELLED");
    assert_eq!(updated.address_id, other.address_id);
    assert_eq!(app.stock_of(fx.product_a).await, 5);
}

#[tokio::test]
async fn test_orders_listed_newest_first() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
    let first = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    app.add_to_cart(fx.buyer.user_id, fx.product_a, 1).await;
    let second = app
        .state
        .orders
        .place_order(fx.buyer.user_id, place(fx.address.address_id, None))
        .await
        .unwrap()
        .order
        .order_id;

    let listed: Vec<i32> = app
        .state
        .orders
        .get_by_user_id(fx.buyer.user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.order.order_id)
        .collect();
    assert_eq!(listed, vec![second, first]);
}
