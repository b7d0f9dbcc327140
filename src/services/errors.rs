use crate::data::repos::errors::{CartRepoError, OrderRepoError};
use crate::services::media::MediaError;
use crate::services::rate_client::RateApiError;
use bigdecimal::BigDecimal;
use diesel::result::{self, DatabaseErrorKind};
use thiserror::Error;

pub fn is_unique_violation(err: &result::Error) -> bool {
    matches!(
        err,
        result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

pub fn is_foreign_key_violation(err: &result::Error) -> bool {
    matches!(
        err,
        result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Discount code not found")]
    DiscountNotFound,
    #[error("Discount code has expired")]
    DiscountExpired,
    #[error("Discount code has reached its usage limit")]
    DiscountExhausted,
    #[error("Minimum purchase of {minimum} is required for this discount")]
    MinimumPurchaseNotMet { minimum: BigDecimal },
    #[error("Insufficient stock for product {product}")]
    InsufficientStock { product: String },
    #[error("Address not found")]
    AddressNotFound,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Unknown order status: {0}")]
    InvalidStatus(String),
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

impl From<OrderRepoError> for OrderServiceError {
    fn from(err: OrderRepoError) -> Self {
        match err {
            OrderRepoError::EmptyCart => OrderServiceError::EmptyCart,
            OrderRepoError::DiscountNotFound => OrderServiceError::DiscountNotFound,
            OrderRepoError::DiscountExpired => OrderServiceError::DiscountExpired,
            OrderRepoError::DiscountExhausted => OrderServiceError::DiscountExhausted,
            OrderRepoError::MinimumPurchaseNotMet { minimum } => {
                OrderServiceError::MinimumPurchaseNotMet { minimum }
            }
            OrderRepoError::InsufficientStock { product } => {
                OrderServiceError::InsufficientStock { product }
            }
            OrderRepoError::AddressNotFound => OrderServiceError::AddressNotFound,
            OrderRepoError::OrderNotFound => OrderServiceError::OrderNotFound,
            OrderRepoError::InvalidStatusTransition { from, to } => {
                OrderServiceError::InvalidStatusTransition { from, to }
            }
            OrderRepoError::Database(e) => OrderServiceError::DatabaseError(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("{0}")]
    InvalidQuantity(&'static str),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Insufficient stock for product {product}, {available} available")]
    InsufficientStock { product: String, available: i32 },
    #[error("Cart item not found")]
    CartItemNotFound,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

impl From<CartRepoError> for CartServiceError {
    fn from(err: CartRepoError) -> Self {
        match err {
            CartRepoError::ProductNotFound => CartServiceError::ProductNotFound,
            CartRepoError::InsufficientStock { product, available } => {
                CartServiceError::InsufficientStock { product, available }
            }
            CartRepoError::CartItemNotFound => CartServiceError::CartItemNotFound,
            CartRepoError::Database(e) => CartServiceError::DatabaseError(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum DiscountServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Discount not found")]
    DiscountNotFound,
    #[error("Discount code already exists")]
    DuplicateCode,
    #[error("Discount is referenced by existing orders")]
    DiscountInUse,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum CategoryServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Category slug already exists")]
    DuplicateSlug,
    #[error("Category still has products")]
    CategoryInUse,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Product slug already exists")]
    DuplicateSlug,
    #[error("Product is referenced by existing orders")]
    ProductInUse,
    #[error("Image storage error")]
    Storage(#[from] MediaError),
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum AddressServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Address not found")]
    AddressNotFound,
    #[error("Address is used by existing orders")]
    AddressInUse,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Email is already registered")]
    DuplicateEmail,
    #[error("Only administrators can change roles")]
    RoleChangeDenied,
    #[error("User still has orders")]
    UserInUse,
    #[error("Password hashing failed")]
    HashingError,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("Wishlist item not found")]
    ItemNotFound,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Product is already in the wishlist")]
    AlreadyWishlisted,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum ShippingServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Order not found")]
    OrderNotFound,
    #[error("Address not found")]
    AddressNotFound,
    #[error("Shipment not found")]
    ShipmentNotFound,
    #[error("Order already has a shipment")]
    ShipmentExists,
    #[error("Cancelled orders cannot be shipped")]
    OrderCancelled,
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("No shipping rates available")]
    NoRatesAvailable,
    #[error("Unknown shipment status: {0}")]
    InvalidStatus(String),
    #[error("Shipment cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error("Shipping rate API error: {0}")]
    Upstream(#[from] RateApiError),
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}
