mod common;

use common::{PASSWORD, TestApp, checkout_fixture};
use storefront_lib::data::models::address::{NewAddress, UpdateAddress};
use storefront_lib::services::errors::{AddressServiceError, UserServiceError};
use storefront_lib::services::order_service::PlaceOrder;
use storefront_lib::services::user_service::ChangeUser;

fn office(user_id: i32, address_type: &str) -> NewAddress {
    NewAddress {
        user_id,
        address1: "Jl. Sudirman 1".to_string(),
        address2: Some("Lantai 5".to_string()),
        city: "Jakarta Barat".to_string(),
        state: "DKI Jakarta".to_string(),
        country: "Indonesia".to_string(),
        postal_code: "11470".to_string(),
        phone: "0215550100".to_string(),
        address_type: address_type.to_string(),
    }
}

#[tokio::test]
async fn test_address_lifecycle() {
    let app = TestApp::new();
    let user = app.user("Agus", "agus@example.com").await;

    let created = app.state.addresses.create(office(user.user_id, "office")).await.unwrap();
    assert_eq!(created.address_type, "OFFICE");

    assert!(matches!(
        app.state.addresses.create(office(user.user_id, "cabin")).await,
        Err(AddressServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        app.state.addresses.create(office(404, "HOME")).await,
        Err(AddressServiceError::InvalidInput(_))
    ));

    let updated = app
        .state
        .addresses
        .update(
            created.address_id,
            UpdateAddress {
                city: Some("Bandung".to_string()),
                ..UpdateAddress::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.city, "Bandung");
    assert_eq!(updated.address2.as_deref(), Some("Lantai 5"));

    let listed = app.state.addresses.get_by_user_id(user.user_id).await.unwrap();
    assert_eq!(listed.len(), 1);

    app.state.addresses.delete(created.address_id).await.unwrap();
    assert!(matches!(
        app.state.addresses.get_by_id(created.address_id).await,
        Err(AddressServiceError::AddressNotFound)
    ));
}

#[tokio::test]
async fn test_address_used_by_order_is_kept() {
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
        app.state.addresses.delete(fx.address.address_id).await,
        Err(AddressServiceError::AddressInUse)
    ));
    assert!(matches!(
        app.state.users.delete(fx.buyer.user_id).await,
        Err(UserServiceError::UserInUse)
    ));
}

#[tokio::test]
async fn test_user_update_rules() {
    let app = TestApp::new();
    let user = app.user("Agus", "agus@example.com").await;
    app.user("Wati", "wati@example.com").await;

    let denied = app
        .state
        .users
        .update(
            user.user_id,
            ChangeUser {
                role: Some("ADMIN".to_string()),
                ..ChangeUser::default()
            },
            false,
        )
        .await;
    assert!(matches!(denied, Err(UserServiceError::RoleChangeDenied)));

    let taken = app
        .state
        .users
        .update(
            user.user_id,
            ChangeUser {
                email: Some("wati@example.com".to_string()),
                ..ChangeUser::default()
            },
            false,
        )
        .await;
    assert!(matches!(taken, Err(UserServiceError::DuplicateEmail)));

    let weak = app
        .state
        .users
        .update(
            user.user_id,
            ChangeUser {
                password: Some("password".to_string()),
                ..ChangeUser::default()
            },
            false,
        )
        .await;
    assert!(matches!(weak, Err(UserServiceError::InvalidInput(_))));

    let promoted = app
        .state
        .users
        .update(
            user.user_id,
            ChangeUser {
                name: Some("Agus S.".to_string()),
                role: Some("admin".to_string()),
                ..ChangeUser::default()
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(promoted.name, "Agus S.");
    assert_eq!(promoted.role, "ADMIN");

    // Profile edits leave the password alone
    assert!(app.state.auth.login("agus@example.com", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_delete_user_without_orders() {
    let app = TestApp::new();
    let user = app.user("Agus", "agus@example.com").await;
    app.address(user.user_id).await;

    app.state.users.delete(user.user_id).await.unwrap();

    assert!(matches!(
        app.state.users.get_by_id(user.user_id).await,
        Err(UserServiceError::UserNotFound)
    ));
    assert!(app.state.addresses.get_all().await.unwrap().is_empty());
}
