use bigdecimal::BigDecimal;
use diesel::result;
use thiserror::Error;

/// Failures of the transactional order writes.
#[derive(Debug, Error)]
pub enum OrderRepoError {
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
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error(transparent)]
    Database(#[from] result::Error),
}

#[derive(Debug, Error)]
pub enum CartRepoError {
    #[error("Product not found")]
    ProductNotFound,
    #[error("Insufficient stock for product {product}, {available} available")]
    InsufficientStock { product: String, available: i32 },
    #[error("Cart item not found")]
    CartItemNotFound,
    #[error(transparent)]
    Database(#[from] result::Error),
}
