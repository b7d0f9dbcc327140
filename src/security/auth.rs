use crate::security::errors::AuthError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use tokio::task;

/// Argon2 password hashing. Both operations run on the blocking pool since
/// argon2 is deliberately slow.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        PasswordService
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();

        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);

            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| AuthError::HashingError)
        })
        .await
        .map_err(|_| AuthError::HashingError)?
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        let hash = hash.to_string();

        task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash).map_err(|_| AuthError::VerificationError)?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(_) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(_) => Err(AuthError::VerificationError),
            }
        })
        .await
        .map_err(|_| AuthError::VerificationError)?
    }
}

/// At least eight characters drawn from letters, digits and `@$!%*?&`,
/// with a lowercase letter, an uppercase letter, a digit and a symbol.
pub fn check_password_policy(password: &str) -> Result<(), &'static str> {
    const SYMBOLS: &str = "@$!%*?&";

    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SYMBOLS.contains(c))
    {
        return Err("Password may only contain letters, digits and @$!%*?&");
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| SYMBOLS.contains(c));

    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Err(
            "Password needs an uppercase letter, a lowercase letter, a digit and a symbol",
        );
    }

    Ok(())
}
