// These run against a migrated MySQL database at DATABASE_URL and wipe it.
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use storefront_lib::api::config::Config;
use storefront_lib::data::database::Database;
use storefront_lib::data::models::address::NewAddress;
use storefront_lib::data::models::category::NewCategory;
use storefront_lib::data::models::discount::{DiscountType, NewDiscount};
use storefront_lib::data::models::product::{NewProduct, UpdateProduct};
use storefront_lib::data::models::user::{NewUser, UserRole};
use storefront_lib::data::repos::errors::{CartRepoError, OrderRepoError};
use storefront_lib::data::repos::implementors::address_repo::AddressRepo;
use storefront_lib::data::repos::implementors::cart_repo::CartRepo;
use storefront_lib::data::repos::implementors::category_repo::CategoryRepo;
use storefront_lib::data::repos::implementors::discount_repo::DiscountRepo;
use storefront_lib::data::repos::implementors::order_repo::OrderRepo;
use storefront_lib::data::repos::implementors::product_repo::ProductRepo;
use storefront_lib::data::repos::implementors::user_repo::UserRepo;
use storefront_lib::data::repos::traits::cart_repository::CartRepository;
use storefront_lib::data::repos::traits::order_repository::OrderRepository;
use storefront_lib::data::repos::traits::repository::Repository;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn database() -> Database {
    let config = Config::from_env().expect("DATABASE_URL and JWT_SECRET must be set");
    Database::new(&config.database_url).expect("Failed to build the pool")
}

async fn setup(db: &Database) -> Result<(), result::Error> {
    use storefront_lib::data::models::schema::{
        addresses, cart_items, categories, discounts, order_items, orders, product_images,
        products, shipments, users, wishlist_items,
    };

    let mut conn = db.get_connection().await?;

    // Children first because of the foreign keys
    diesel::delete(shipments::table).execute(&mut conn).await?;
    diesel::delete(order_items::table).execute(&mut conn).await?;
    diesel::delete(orders::table).execute(&mut conn).await?;
    diesel::delete(wishlist_items::table).execute(&mut conn).await?;
    diesel::delete(cart_items::table).execute(&mut conn).await?;
    diesel::delete(product_images::table).execute(&mut conn).await?;
    diesel::delete(products::table).execute(&mut conn).await?;
    diesel::delete(categories::table).execute(&mut conn).await?;
    diesel::delete(discounts::table).execute(&mut conn).await?;
    diesel::delete(addresses::table).execute(&mut conn).await?;
    diesel::delete(users::table).execute(&mut conn).await?;

    Ok(())
}

struct Seeded {
    user_id: i32,
    address_id: i32,
    product_a: i32,
    product_b: i32,
}

/// Buyer with an address and a cart of 2 x A (100, stock 5) and 1 x B (50, stock 1).
async fn seed(db: &Database) -> Seeded {
    setup(db).await.expect("Failed to clean the database");

    let user = UserRepo::new(db.clone())
        .add(NewUser {
            name: "Repo Buyer".to_string(),
            email: "repo.buyer@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: UserRole::User.as_str().to_string(),
        })
        .await
        .expect("Failed to add user");

    let address = AddressRepo::new(db.clone())
        .add(NewAddress {
            user_id: user.user_id,
            address1: "Jl. Merdeka 10".to_string(),
            address2: None,
            city: "Bandung".to_string(),
            state: "Jawa Barat".to_string(),
            country: "Indonesia".to_string(),
            postal_code: "40111".to_string(),
            phone: "0221234567".to_string(),
            address_type: "HOME".to_string(),
        })
        .await
        .expect("Failed to add address");

    let category = CategoryRepo::new(db.clone())
        .add(NewCategory {
            name: "Apparel".to_string(),
            slug: "apparel".to_string(),
        })
        .await
        .expect("Failed to add category");

    let products = ProductRepo::new(db.clone());
    let mut ids = Vec::new();
    let catalog = [
        ("Canvas Tote", "canvas-tote", "100", 5),
        ("Enamel Pin", "enamel-pin", "50", 1),
    ];
    for (name, slug, price, stock) in catalog {
        let product = products
            .add(NewProduct {
                category_id: category.category_id,
                name: name.to_string(),
                slug: slug.to_string(),
                description: None,
                price: dec(price),
                weight: dec("0.5"),
                stock,
            })
            .await
            .expect("Failed to add product");
        ids.push(product.product_id);
    }

    let carts = CartRepo::new(db.clone());
    carts.upsert(user.user_id, ids[0], 2).await.expect("Failed to add cart line");
    carts.upsert(user.user_id, ids[1], 1).await.expect("Failed to add cart line");

    Seeded {
        user_id: user.user_id,
        address_id: address.address_id,
        product_a: ids[0],
        product_b: ids[1],
    }
}

async fn add_discount(db: &Database, code: &str, max_usage: Option<i32>) -> i32 {
    DiscountRepo::new(db.clone())
        .add(NewDiscount {
            code: code.to_string(),
            description: None,
            discount_type: DiscountType::Percentage.as_str().to_string(),
            value: dec("10"),
            min_purchase: None,
            max_discount: None,
            expires_at: None,
            max_usage,
        })
        .await
        .expect("Failed to add discount")
        .discount_id
}

async fn stock_of(db: &Database, product_id: i32) -> i32 {
    ProductRepo::new(db.clone())
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .stock
}

async fn usage_of(db: &Database, discount_id: i32) -> i32 {
    DiscountRepo::new(db.clone())
        .get_by_id(discount_id)
        .await
        .expect("Failed to get discount")
        .expect("Discount not found")
        .usage_count
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_place_order_without_discount() {
    let db = database();
    let seeded = seed(&db).await;
    let repo = OrderRepo::new(db.clone());

    let details = repo
        .place_order(seeded.user_id, seeded.address_id, None, Utc::now().naive_utc())
        .await
        .expect("Order should be placed");

    assert_eq!(details.order.total, dec("250"));
    assert_eq!(details.order.status, "PENDING");
    assert_eq!(details.items.len(), 2);
    assert_eq!(stock_of(&db, seeded.product_a).await, 3);
    assert_eq!(stock_of(&db, seeded.product_b).await, 0);

    let cart = CartRepo::new(db.clone())
        .get_by_user_id(seeded.user_id)
        .await
        .unwrap();
    assert!(cart.is_empty());

    let stored = repo.get_by_id(details.order.order_id).await.unwrap();
    assert_eq!(stored, Some(details));
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_place_order_with_discount() {
    let db = database();
    let seeded = seed(&db).await;
    let discount_id = add_discount(&db, "SAVE10", None).await;

    let details = OrderRepo::new(db.clone())
        .place_order(
            seeded.user_id,
            seeded.address_id,
            Some("SAVE10".to_string()),
            Utc::now().naive_utc(),
        )
        .await
        .expect("Order should be placed");

    assert_eq!(details.order.total, dec("225"));
    assert_eq!(details.order.discount_id, Some(discount_id));
    assert_eq!(usage_of(&db, discount_id).await, 1);
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_over_stock_line_rolls_back() {
    let db = database();
    let seeded = seed(&db).await;
    let discount_id = add_discount(&db, "SAVE10", None).await;

    ProductRepo::new(db.clone())
        .update(
            seeded.product_b,
            UpdateProduct {
                stock: Some(0),
                ..UpdateProduct::default()
            },
        )
        .await
        .unwrap();

    let repo = OrderRepo::new(db.clone());
    let result = repo
        .place_order(
            seeded.user_id,
            seeded.address_id,
            Some("SAVE10".to_string()),
            Utc::now().naive_utc(),
        )
        .await;

    assert!(matches!(result, Err(OrderRepoError::InsufficientStock { .. })));
    assert_eq!(stock_of(&db, seeded.product_a).await, 5);
    assert_eq!(usage_of(&db, discount_id).await, 0);
    assert!(repo.get_all().await.unwrap().is_empty());

    let cart = CartRepo::new(db.clone())
        .get_by_user_id(seeded.user_id)
        .await
        .unwrap();
    assert_eq!(cart.len(), 2);
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_exhausted_code_is_rejected() {
    let db = database();
    let seeded = seed(&db).await;
    let discount_id = add_discount(&db, "ONCE", Some(1)).await;
    let repo = OrderRepo::new(db.clone());

    repo.place_order(
        seeded.user_id,
        seeded.address_id,
        Some("ONCE".to_string()),
        Utc::now().naive_utc(),
    )
    .await
    .expect("First use should succeed");

    CartRepo::new(db.clone())
        .upsert(seeded.user_id, seeded.product_a, 1)
        .await
        .unwrap();

    let again = repo
        .place_order(
            seeded.user_id,
            seeded.address_id,
            Some("ONCE".to_string()),
            Utc::now().naive_utc(),
        )
        .await;

    assert!(matches!(again, Err(OrderRepoError::DiscountExhausted)));
    assert_eq!(usage_of(&db, discount_id).await, 1);
    assert_eq!(stock_of(&db, seeded.product_a).await, 3);
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_cancel_then_delete_restocks_once() {
    let db = database();
    let seeded = seed(&db).await;
    let repo = OrderRepo::new(db.clone());

    let order_id = repo
        .place_order(seeded.user_id, seeded.address_id, None, Utc::now().naive_utc())
        .await
        .unwrap()
        .order
        .order_id;

    let missing = repo.cancel_with_restock(order_id, Some(seeded.address_id + 1000)).await;
    assert!(matches!(missing, Err(OrderRepoError::AddressNotFound)));
    assert_eq!(stock_of(&db, seeded.product_a).await, 3);

    let cancelled = repo.cancel_with_restock(order_id, None).await.unwrap();
    assert_eq!(cancelled.status, "CANCELLED");
    assert_eq!(stock_of(&db, seeded.product_a).await, 5);
    assert_eq!(stock_of(&db, seeded.product_b).await, 1);

    repo.delete_with_restock(order_id).await.unwrap();
    assert_eq!(stock_of(&db, seeded.product_a).await, 5);
    assert_eq!(stock_of(&db, seeded.product_b).await, 1);
    assert_eq!(repo.get_by_id(order_id).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
#[serial_test::serial]
async fn test_cart_upsert_overwrites_quantity() {
    let db = database();
    let seeded = seed(&db).await;
    let carts = CartRepo::new(db.clone());

    let (line, created) = carts.upsert(seeded.user_id, seeded.product_a, 4).await.unwrap();
    assert!(!created);
    assert_eq!(line.quantity, 4);

    let too_many = carts.upsert(seeded.user_id, seeded.product_a, 6).await;
    assert!(matches!(
        too_many,
        Err(CartRepoError::InsufficientStock { available: 5, .. })
    ));

    let unknown = carts.upsert(seeded.user_id, seeded.product_a + 1000, 1).await;
    assert!(matches!(unknown, Err(CartRepoError::ProductNotFound)));

    // Cart writes never touch stock
    assert_eq!(stock_of(&db, seeded.product_a).await, 5);
}
