use crate::api::config::Config;
use crate::data::models::user::{User, UserRole};
use crate::security::errors::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: i32,
    pub email: String,
    pub role: UserRole,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn can_access(&self, user_id: i32) -> bool {
        self.is_admin() || self.sub == user_id
    }
}

/// Issues and checks HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_minutes: u64) -> Self {
        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_minutes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration_minutes)
    }

    pub fn expiration_seconds(&self) -> u64 {
        self.expiration_minutes * 60
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;

        let claims = AccessClaims {
            sub: user.user_id,
            email: user.email.clone(),
            role: user.role(),
            iat: curr_time,
            exp: curr_time + self.expiration_seconds() as usize,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenCreationError)?;

        tracing::debug!(user_id = user.user_id, "Token generated");

        Ok(token)
    }

    pub fn decode_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            user_id: 42,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: String::new(),
            role: role.as_str().to_string(),
            reset_token: None,
            reset_token_expiry: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn token_carries_identity_and_role() {
        let service = JwtService::new("secret", 60);
        let token = service.generate_token(&user(UserRole::Admin)).unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtService::new("secret", 60)
            .generate_token(&user(UserRole::User))
            .unwrap();
        assert!(matches!(
            JwtService::new("other", 60).decode_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn owners_and_admins_can_access() {
        let service = JwtService::new("secret", 60);
        let token = service.generate_token(&user(UserRole::User)).unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert!(claims.can_access(42));
        assert!(!claims.can_access(7));
    }
}
