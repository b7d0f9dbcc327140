mod common;

use common::{TestApp, dec};
use storefront_lib::services::errors::CartServiceError;

#[tokio::test]
async fn test_add_then_overwrite_quantity() {
    let app = TestApp::new();
    let user = app.user("Dewi", "dewi@example.com").await;
    let category = app.category("Kitchen").await;
    let product = app.product(category, "Teak Spoon", "12.50", 10).await;

    let (first, created) = app
        .state
        .carts
        .add_or_update(user.user_id, product, 2)
        .await
        .unwrap();
    assert!(created);
    assert_eq!(first.quantity, 2);

    let (second, created) = app
        .state
        .carts
        .add_or_update(user.user_id, product, 4)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(second.cart_item_id, first.cart_item_id);
    assert_eq!(second.quantity, 4);

    let cart = app.state.carts.get_user_cart(user.user_id).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].subtotal(), dec("50"));
    // Adding to the cart does not reserve stock
    assert_eq!(app.stock_of(product).await, 10);
}

#[tokio::test]
async fn test_quantity_checks() {
    let app = TestApp::new();
    let user = app.user("Dewi", "dewi@example.com").await;
    let category = app.category("Kitchen").await;
    let product = app.product(category, "Teak Spoon", "12.50", 3).await;

    assert!(matches!(
        app.state.carts.add_or_update(user.user_id, product, 0).await,
        Err(CartServiceError::InvalidQuantity(_))
    ));

    match app.state.carts.add_or_update(user.user_id, product, 4).await {
        Err(CartServiceError::InsufficientStock { product, available }) => {
            assert_eq!(product, "Teak Spoon");
            assert_eq!(available, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(matches!(
        app.state.carts.add_or_update(user.user_id, 999, 1).await,
        Err(CartServiceError::ProductNotFound)
    ));
    assert!(app.state.carts.get_user_cart(user.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let app = TestApp::new();
    let user = app.user("Dewi", "dewi@example.com").await;
    let category = app.category("Kitchen").await;
    let product = app.product(category, "Teak Spoon", "12.50", 3).await;
    app.add_to_cart(user.user_id, product, 1).await;

    let updated = app
        .state
        .carts
        .update_quantity(user.user_id, product, 3)
        .await
        .unwrap();
    assert_eq!(updated.map(|i| i.quantity), Some(3));

    let removed = app
        .state
        .carts
        .update_quantity(user.user_id, product, 0)
        .await
        .unwrap();
    assert!(removed.is_none());
    assert!(app.state.carts.get_user_cart(user.user_id).await.unwrap().is_empty());

    assert!(matches!(
        app.state.carts.update_quantity(user.user_id, product, 1).await,
        Err(CartServiceError::CartItemNotFound)
    ));
}

#[tokio::test]
async fn test_remove_item() {
    let app = TestApp::new();
    let user = app.user("Dewi", "dewi@example.com").await;
    let category = app.category("Kitchen").await;
    let product = app.product(category, "Teak Spoon", "12.50", 3).await;
    let (item, _) = app
        .state
        .carts
        .add_or_update(user.user_id, product, 1)
        .await
        .unwrap();

    app.state.carts.remove_item(item.cart_item_id).await.unwrap();
    assert!(matches!(
        app.state.carts.remove_item(item.cart_item_id).await,
        Err(CartServiceError::CartItemNotFound)
    ));
}
