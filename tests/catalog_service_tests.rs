mod common;

use chrono::{Duration, Utc};
use common::{TestApp, checkout_fixture, dec};
use storefront_lib::data::models::discount::{NewDiscount, UpdateDiscount};
use storefront_lib::services::errors::{
    CategoryServiceError, DiscountServiceError, OrderServiceError, ProductServiceError,
    WishlistServiceError,
};
use storefront_lib::services::order_service::PlaceOrder;
use storefront_lib::services::product_service::{ChangeProduct, CreateProduct};

fn fixed(code: &str, value: &str) -> NewDiscount {
    NewDiscount {
        code: code.to_string(),
        description: None,
        discount_type: "fixed".to_string(),
        value: dec(value),
        min_purchase: None,
        max_discount: None,
        expires_at: None,
        max_usage: None,
    }
}

#[tokio::test]
async fn test_category_slugs() {
    let app = TestApp::new();

    let category = app.state.categories.create("Home & Living").await.unwrap();
    assert_eq!(category.slug, "home-living");

    let found = app.state.categories.get_by_slug("home-living").await.unwrap();
    assert_eq!(found.category_id, category.category_id);

    assert!(matches!(
        app.state.categories.create("home living").await,
        Err(CategoryServiceError::DuplicateSlug)
    ));

    let renamed = app
        .state
        .categories
        .update(category.category_id, Some("Garden"))
        .await
        .unwrap();
    assert_eq!(renamed.slug, "garden");
}

#[tokio::test]
async fn test_category_with_products_cannot_be_deleted() {
    let app = TestApp::new();
    let category = app.category("Books").await;
    let product = app.product(category, "Field Guide", "80", 2).await;

    assert!(matches!(
        app.state.categories.delete(category).await,
        Err(CategoryServiceError::CategoryInUse)
    ));

    app.state.products.delete(product).await.unwrap();
    app.state.categories.delete(category).await.unwrap();
    assert!(matches!(
        app.state.categories.get_by_id(category).await,
        Err(CategoryServiceError::CategoryNotFound)
    ));
}

#[tokio::test]
async fn test_product_rules() {
    let app = TestApp::new();
    let category = app.category("Books").await;

    let negative = app
        .state
        .products
        .create(CreateProduct {
            category_id: category,
            name: "Atlas".to_string(),
            description: None,
            price: dec("-1"),
            weight: dec("1"),
            stock: 1,
        })
        .await;
    assert!(matches!(negative, Err(ProductServiceError::InvalidInput(_))));

    let orphan = app
        .state
        .products
        .create(CreateProduct {
            category_id: 404,
            name: "Atlas".to_string(),
            description: None,
            price: dec("10"),
            weight: dec("1"),
            stock: 1,
        })
        .await;
    assert!(matches!(orphan, Err(ProductServiceError::CategoryNotFound)));

    let product = app.product(category, "World Atlas", "150", 4).await;
    let details = app.state.products.get_by_slug("world-atlas").await.unwrap();
    assert_eq!(details.product.product_id, product);

    let listed = app.state.products.get_by_category_slug("books").await.unwrap();
    assert_eq!(listed.len(), 1);

    let updated = app
        .state
        .products
        .update(
            product,
            ChangeProduct {
                name: Some("Pocket Atlas".to_string()),
                price: Some(dec("90")),
                ..ChangeProduct::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.product.slug, "pocket-atlas");
    assert_eq!(updated.product.price, dec("90"));
}

#[tokio::test]
async fn test_ordered_product_cannot_be_deleted() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;
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
        .unwrap();

    assert!(matches!(
        app.state.products.delete(fx.product_a).await,
        Err(ProductServiceError::ProductInUse)
    ));
}

#[tokio::test]
async fn test_discount_rules() {
    let app = TestApp::new();

    let mut too_big = fixed("BIG", "101");
    too_big.discount_type = "PERCENTAGE".to_string();
    assert!(matches!(
        app.state.discounts.create(too_big).await,
        Err(DiscountServiceError::InvalidInput(_))
    ));

    let mut bad_type = fixed("ODD", "5");
    bad_type.discount_type = "BOGO".to_string();
    assert!(matches!(
        app.state.discounts.create(bad_type).await,
        Err(DiscountServiceError::InvalidInput(_))
    ));

    let created = app.state.discounts.create(fixed(" FLAT5 ", "5")).await.unwrap();
    assert_eq!(created.code, "FLAT5");
    assert_eq!(created.discount_type, "FIXED");
    assert_eq!(created.usage_count, 0);

    assert!(matches!(
        app.state.discounts.create(fixed("FLAT5", "7")).await,
        Err(DiscountServiceError::DuplicateCode)
    ));

    let zeroed = app
        .state
        .discounts
        .update(
            created.discount_id,
            UpdateDiscount {
                value: Some(dec("0")),
                ..UpdateDiscount::default()
            },
        )
        .await;
    assert!(matches!(zeroed, Err(DiscountServiceError::InvalidInput(_))));

    let found = app.state.discounts.get_by_code("FLAT5").await.unwrap();
    assert_eq!(found.value, dec("5"));
}

#[tokio::test]
async fn test_expired_and_minimum_purchase_codes() {
    let app = TestApp::new();
    let fx = checkout_fixture(&app).await;

    let mut expired = fixed("OLD", "10");
    expired.expires_at = Some(Utc::now().naive_utc() - Duration::days(1));
    app.state.discounts.create(expired).await.unwrap();

    let mut minimum = fixed("BIGSPEND", "10");
    minimum.min_purchase = Some(dec("1000"));
    app.state.discounts.create(minimum).await.unwrap();

    let order = |code: &str| PlaceOrder {
        address_id: fx.address.address_id,
        discount_code: Some(code.to_string()),
    };

    assert!(matches!(
        app.state.orders.place_order(fx.buyer.user_id, order("OLD")).await,
        Err(OrderServiceError::DiscountExpired)
    ));
    assert!(matches!(
        app.state.orders.place_order(fx.buyer.user_id, order("BIGSPEND")).await,
        Err(OrderServiceError::MinimumPurchaseNotMet { .. })
    ));

    let flat = app.state.discounts.create(fixed("FLAT30", "30")).await.unwrap();
    let details = app
        .state
        .orders
        .place_order(fx.buyer.user_id, order("FLAT30"))
        .await
        .unwrap();
    assert_eq!(details.order.total, dec("220"));
    assert_eq!(details.order.discount_id, Some(flat.discount_id));
}

#[tokio::test]
async fn test_wishlist() {
    let app = TestApp::new();
    let user = app.user("Putri", "putri@example.com").await;
    let category = app.category("Books").await;
    let product = app.product(category, "Field Guide", "80", 2).await;

    let (item, wished) = app.state.wishlists.add(user.user_id, product).await.unwrap();
    assert_eq!(wished.name, "Field Guide");

    assert!(matches!(
        app.state.wishlists.add(user.user_id, product).await,
        Err(WishlistServiceError::AlreadyWishlisted)
    ));
    assert!(matches!(
        app.state.wishlists.add(user.user_id, 404).await,
        Err(WishlistServiceError::ProductNotFound)
    ));

    let list = app.state.wishlists.get_by_user_id(user.user_id).await.unwrap();
    assert_eq!(list.len(), 1);

    app.state.wishlists.delete(item.wishlist_item_id).await.unwrap();
    assert!(matches!(
        app.state.wishlists.get_by_id(item.wishlist_item_id).await,
        Err(WishlistServiceError::ItemNotFound)
    ));
}
