use crate::security::errors::AuthError;
use crate::services::errors::{
    AddressServiceError, CartServiceError, CategoryServiceError, DiscountServiceError,
    OrderServiceError, ProductServiceError, ShippingServiceError, UserServiceError,
    WishlistServiceError,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Every error the HTTP layer can return. Rendered as
/// `{"error": <code>, "message": <text>}`.
#[derive(Debug, thiserror::Error)]
pub enum APIErrors {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    BusinessRule(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("{0}")]
    TokenExpired(String),
    #[error("Permission denied")]
    Forbidden,
    #[error("{0}")]
    Upstream(String),
    #[error("Internal server error")]
    Internal,
}

impl APIErrors {
    pub fn status(&self) -> StatusCode {
        match self {
            APIErrors::ValidationError(_) | APIErrors::BusinessRule(_) => StatusCode::BAD_REQUEST,
            APIErrors::NotFound(_) => StatusCode::NOT_FOUND,
            APIErrors::Conflict(_) => StatusCode::CONFLICT,
            APIErrors::Unauthorized | APIErrors::TokenExpired(_) => StatusCode::UNAUTHORIZED,
            APIErrors::Forbidden => StatusCode::FORBIDDEN,
            APIErrors::Upstream(_) => StatusCode::BAD_GATEWAY,
            APIErrors::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            APIErrors::ValidationError(_) => "validation_error",
            APIErrors::BusinessRule(_) => "business_rule",
            APIErrors::NotFound(_) => "not_found",
            APIErrors::Conflict(_) => "conflict",
            APIErrors::Unauthorized => "unauthorized",
            APIErrors::TokenExpired(_) => "token_expired",
            APIErrors::Forbidden => "forbidden",
            APIErrors::Upstream(_) => "upstream_error",
            APIErrors::Internal => "internal_error",
        }
    }

    fn internal(source: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %source, "Request failed");
        APIErrors::Internal
    }
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<AuthError> for APIErrors {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            AuthError::InvalidResetToken => APIErrors::ValidationError(err.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidToken => APIErrors::Unauthorized,
            AuthError::TokenExpired => APIErrors::TokenExpired(err.to_string()),
            AuthError::UserNotFound => APIErrors::NotFound(err.to_string()),
            AuthError::DuplicateEmail => APIErrors::Conflict(err.to_string()),
            AuthError::HashingError
            | AuthError::VerificationError
            | AuthError::TokenCreationError
            | AuthError::MailError => APIErrors::internal(&err),
            AuthError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<OrderServiceError> for APIErrors {
    fn from(err: OrderServiceError) -> Self {
        use OrderServiceError::*;
        match err {
            OrderNotFound => APIErrors::NotFound(err.to_string()),
            InvalidStatus(_) => APIErrors::ValidationError(err.to_string()),
            // Unknown discount code or address on checkout is a 400
            DiscountNotFound | AddressNotFound => APIErrors::BusinessRule(err.to_string()),
            EmptyCart
            | DiscountExpired
            | DiscountExhausted
            | MinimumPurchaseNotMet { .. }
            | InsufficientStock { .. }
            | InvalidStatusTransition { .. } => APIErrors::BusinessRule(err.to_string()),
            DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<CartServiceError> for APIErrors {
    fn from(err: CartServiceError) -> Self {
        match err {
            CartServiceError::InvalidQuantity(msg) => APIErrors::ValidationError(msg.to_string()),
            CartServiceError::ProductNotFound | CartServiceError::CartItemNotFound => {
                APIErrors::NotFound(err.to_string())
            }
            CartServiceError::InsufficientStock { .. } => APIErrors::BusinessRule(err.to_string()),
            CartServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<DiscountServiceError> for APIErrors {
    fn from(err: DiscountServiceError) -> Self {
        match err {
            DiscountServiceError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            DiscountServiceError::DiscountNotFound => APIErrors::NotFound(err.to_string()),
            DiscountServiceError::DuplicateCode | DiscountServiceError::DiscountInUse => {
                APIErrors::Conflict(err.to_string())
            }
            DiscountServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<CategoryServiceError> for APIErrors {
    fn from(err: CategoryServiceError) -> Self {
        match err {
            CategoryServiceError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            CategoryServiceError::CategoryNotFound => APIErrors::NotFound(err.to_string()),
            CategoryServiceError::DuplicateSlug | CategoryServiceError::CategoryInUse => {
                APIErrors::Conflict(err.to_string())
            }
            CategoryServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<ProductServiceError> for APIErrors {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            ProductServiceError::ProductNotFound | ProductServiceError::CategoryNotFound => {
                APIErrors::NotFound(err.to_string())
            }
            ProductServiceError::DuplicateSlug | ProductServiceError::ProductInUse => {
                APIErrors::Conflict(err.to_string())
            }
            ProductServiceError::Storage(crate::services::media::MediaError::UnsupportedType(
                ref name,
            )) => APIErrors::ValidationError(format!("Unsupported image type: {name}")),
            ProductServiceError::Storage(ref e) => APIErrors::internal(e),
            ProductServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<AddressServiceError> for APIErrors {
    fn from(err: AddressServiceError) -> Self {
        match err {
            AddressServiceError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            AddressServiceError::AddressNotFound => APIErrors::NotFound(err.to_string()),
            AddressServiceError::AddressInUse => APIErrors::Conflict(err.to_string()),
            AddressServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<UserServiceError> for APIErrors {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::InvalidInput(msg) => APIErrors::ValidationError(msg),
            UserServiceError::UserNotFound => APIErrors::NotFound(err.to_string()),
            UserServiceError::DuplicateEmail | UserServiceError::UserInUse => {
                APIErrors::Conflict(err.to_string())
            }
            UserServiceError::RoleChangeDenied => APIErrors::Forbidden,
            UserServiceError::HashingError => APIErrors::internal(&err),
            UserServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<WishlistServiceError> for APIErrors {
    fn from(err: WishlistServiceError) -> Self {
        match err {
            WishlistServiceError::ItemNotFound | WishlistServiceError::ProductNotFound => {
                APIErrors::NotFound(err.to_string())
            }
            WishlistServiceError::AlreadyWishlisted => APIErrors::Conflict(err.to_string()),
            WishlistServiceError::DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}

impl From<ShippingServiceError> for APIErrors {
    fn from(err: ShippingServiceError) -> Self {
        use ShippingServiceError::*;
        match err {
            InvalidInput(msg) => APIErrors::ValidationError(msg),
            InvalidStatus(_) => APIErrors::ValidationError(err.to_string()),
            InvalidStatusTransition { .. } | OrderCancelled => {
                APIErrors::BusinessRule(err.to_string())
            }
            OrderNotFound | AddressNotFound | ShipmentNotFound => {
                APIErrors::NotFound(err.to_string())
            }
            ShipmentExists => APIErrors::Conflict(err.to_string()),
            CityNotFound(_) | NoRatesAvailable => APIErrors::Upstream(err.to_string()),
            Upstream(ref e) => {
                tracing::error!(error = %e, "Shipping rate API failed");
                APIErrors::Upstream("Shipping rate service is unavailable".to_string())
            }
            DatabaseError(ref e) => APIErrors::internal(e),
        }
    }
}
