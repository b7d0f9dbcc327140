use crate::data::models::user::{NewUser, ResetTokenChange, UpdateUser, User, UserRole};
use crate::data::repos::traits::repository::UserRepository;
use crate::security::auth::{PasswordService, check_password_policy};
use crate::security::errors::AuthError;
use crate::security::jwt::JwtService;
use crate::security::reset_token::{generate_reset_token, hash_reset_token, reset_token_ttl};
use crate::services::errors::is_unique_violation;
use crate::services::mailer::{EmailMessage, Mailer};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
    jwt: JwtService,
    mailer: Arc<dyn Mailer>,
    client_url: String,
    admin_email: Option<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt: JwtService,
        mailer: Arc<dyn Mailer>,
        client_url: String,
        admin_email: Option<String>,
    ) -> Self {
        AuthService {
            users,
            passwords: PasswordService::new(),
            jwt,
            mailer,
            client_url,
            admin_email,
        }
    }

    fn normalize_email(email: &str) -> Result<String, AuthError> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidInput("Invalid email address".to_string()));
        }
        Ok(email)
    }

    /// Creates an account. The configured admin email registers as `ADMIN`.
    pub async fn register(&self, input: RegisterUser) -> Result<User, AuthError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::InvalidInput("Name is required".to_string()));
        }
        let email = Self::normalize_email(&input.email)?;
        check_password_policy(&input.password)
            .map_err(|m| AuthError::InvalidInput(m.to_string()))?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let is_admin = self
            .admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(&email));
        let role = if is_admin { UserRole::Admin } else { UserRole::User };

        let password_hash = self.passwords.hash_password(&input.password).await?;

        let user = self
            .users
            .add(NewUser {
                name,
                email,
                password_hash,
                role: role.as_str().to_string(),
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::DuplicateEmail
                } else {
                    e.into()
                }
            })?;

        tracing::info!(user_id = user.user_id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks the credentials and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AuthError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.get_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .passwords
            .verify_password(password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = user.user_id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(&user)?;
        tracing::info!(user_id = user.user_id, "User logged in");

        Ok((token, user))
    }

    /// Stores a hashed one-time token and mails the reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let email = Self::normalize_email(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = generate_reset_token();
        let expiry = chrono::Utc::now().naive_utc() + reset_token_ttl();

        self.users
            .set_reset_token(
                user.user_id,
                ResetTokenChange {
                    reset_token: Some(hash_reset_token(&token)),
                    reset_token_expiry: Some(expiry),
                },
            )
            .await?;

        let link = format!(
            "{}/reset-password?token={}&email={}",
            self.client_url.trim_end_matches('/'),
            token,
            user.email
        );

        let message = EmailMessage {
            to: user.email.clone(),
            subject: "Password reset".to_string(),
            text: format!("Use this link to reset your password: {link}\nThe link expires in one hour."),
            html: format!(
                "<p>Use this link to reset your password:</p><p><a href=\"{link}\">{link}</a></p><p>The link expires in one hour.</p>"
            ),
        };

        self.mailer.send(message).await.map_err(|e| {
            tracing::error!(user_id = user.user_id, error = %e, "Reset email failed");
            AuthError::MailError
        })?;

        tracing::info!(user_id = user.user_id, "Password reset requested");
        Ok(())
    }

    /// Sets a new password when the token matches and has not expired.
    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        check_password_policy(new_password).map_err(|m| AuthError::InvalidInput(m.to_string()))?;

        let email = email.trim().to_lowercase();
        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let now = chrono::Utc::now().naive_utc();
        let matches = user.reset_token.as_deref() == Some(hash_reset_token(token.trim()).as_str());
        let fresh = user.reset_token_expiry.is_some_and(|expiry| expiry > now);
        if !matches || !fresh {
            return Err(AuthError::InvalidResetToken);
        }

        let password_hash = self.passwords.hash_password(new_password).await?;
        self.users
            .update(
                user.user_id,
                UpdateUser {
                    password_hash: Some(password_hash),
                    ..UpdateUser::default()
                },
            )
            .await?;

        self.users
            .set_reset_token(
                user.user_id,
                ResetTokenChange {
                    reset_token: None,
                    reset_token_expiry: None,
                },
            )
            .await?;

        tracing::info!(user_id = user.user_id, "Password reset");
        Ok(())
    }

    pub fn token_lifetime_seconds(&self) -> u64 {
        self.jwt.expiration_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.id"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana @example.com"));
    }
}
