use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ShippingConfig {
    pub api_key: String,
    pub cost_url: String,
    pub city_url: String,
    pub origin_city_id: String,
    pub timeout: Duration,
    pub city_cache_ttl: Duration,
    pub city_cache_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
    pub bind_address: String,
    pub cors_origin: Option<String>,
    pub client_url: String,
    pub public_base_url: String,
    pub upload_dir: String,
    pub admin_email: Option<String>,
    pub shipping: ShippingConfig,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(name: &'static str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_minutes: parsed("JWT_EXPIRATION_MINUTES", 60)?,
            bind_address: or_default("BIND_ADDRESS", "127.0.0.1:3000"),
            cors_origin: optional("CORS_ORIGIN"),
            client_url: or_default("CLIENT_URL", "http://localhost:3000"),
            public_base_url: or_default("PUBLIC_BASE_URL", "http://localhost:3000"),
            upload_dir: or_default("UPLOAD_DIR", "public/images"),
            admin_email: optional("ADMIN_EMAIL"),
            shipping: ShippingConfig {
                api_key: or_default("SHIPPING_API_KEY", ""),
                cost_url: or_default("SHIPPING_COST_URL", "https://api.rajaongkir.com/starter/cost"),
                city_url: or_default("SHIPPING_CITY_URL", "https://api.rajaongkir.com/starter/city"),
                origin_city_id: or_default("SHIPPING_ORIGIN_CITY_ID", "178"),
                timeout: Duration::from_secs(parsed("SHIPPING_API_TIMEOUT_SECS", 30)?),
                city_cache_ttl: Duration::from_secs(parsed("CITY_CACHE_TTL_SECS", 86_400)?),
                city_cache_capacity: parsed("CITY_CACHE_CAPACITY", 512)?,
            },
        };

        tracing::info!("Config loaded");

        Ok(config)
    }

    /// Settings for tests and local tooling that never touch the network.
    pub fn for_tests() -> Self {
        Config {
            database_url: "mysql://localhost/storefront_test".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_minutes: 60,
            bind_address: "127.0.0.1:0".to_string(),
            cors_origin: None,
            client_url: "http://localhost:3000".to_string(),
            public_base_url: "http://localhost:5000".to_string(),
            upload_dir: "public/images".to_string(),
            admin_email: Some("admin@example.com".to_string()),
            shipping: ShippingConfig {
                api_key: String::new(),
                cost_url: "http://localhost/cost".to_string(),
                city_url: "http://localhost/city".to_string(),
                origin_city_id: "178".to_string(),
                timeout: Duration::from_secs(5),
                city_cache_ttl: Duration::from_secs(60),
                city_cache_capacity: 16,
            },
        }
    }
}
