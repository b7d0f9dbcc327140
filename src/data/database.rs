use diesel::result;
use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::{BuildError, Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to create database connection pool: {0}")]
pub struct DatabaseSetupError(#[from] BuildError);

/// Shared handle to the MySQL connection pool. Cloning is cheap and every
/// clone draws from the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self, DatabaseSetupError> {
        let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
        let pool = Pool::builder(config).build()?;

        tracing::info!("DB connection pool created");

        Ok(Database { pool })
    }

    /// Checks out a pooled connection. Pool failures are reported as a diesel
    /// error so repositories only deal with one error type.
    pub async fn get_connection(&self) -> Result<Object<AsyncMysqlConnection>, result::Error> {
        self.pool.get().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })
    }
}
