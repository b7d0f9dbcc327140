use diesel::result;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed")]
    HashingError,
    #[error("Password verification failed")]
    VerificationError,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Email is already registered")]
    DuplicateEmail,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Authentication token has expired")]
    TokenExpired,
    #[error("Token creation failed")]
    TokenCreationError,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid or expired reset token")]
    InvalidResetToken,
    #[error("Failed to send email")]
    MailError,
    #[error("Database error")]
    DatabaseError(#[from] result::Error),
}
