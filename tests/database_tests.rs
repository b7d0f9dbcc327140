use storefront_lib::api::config::Config;
use storefront_lib::data::database::Database;
use storefront_lib::data::repos::implementors::category_repo::CategoryRepo;
use storefront_lib::data::repos::traits::repository::Repository;

// Needs a migrated MySQL database at DATABASE_URL
#[tokio::test]
#[ignore]
#[serial_test::serial]
pub async fn test_database_connection() {
    let config = Config::from_env().expect("DATABASE_URL and JWT_SECRET must be set");
    let database = Database::new(&config.database_url).expect("Failed to build the pool");

    let conn = database.get_connection().await;
    assert!(conn.is_ok(), "Failed to get a database connection");

    let categories = CategoryRepo::new(database.clone()).get_all().await;
    assert!(categories.is_ok(), "Failed to query categories");
}
