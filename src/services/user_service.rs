use crate::data::models::user::{UpdateUser, User, UserRole};
use crate::data::repos::traits::repository::UserRepository;
use crate::security::auth::{PasswordService, check_password_policy};
use crate::services::auth_service::is_valid_email;
use crate::services::errors::{UserServiceError, is_foreign_key_violation, is_unique_violation};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ChangeUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    passwords: PasswordService,
}

fn invalid(message: impl Into<String>) -> UserServiceError {
    UserServiceError::InvalidInput(message.into())
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        UserService {
            repo,
            passwords: PasswordService::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<User, UserServiceError> {
        self.repo
            .get_by_id(user_id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    /// Updates profile fields. A new password is re-hashed; only an admin
    /// may change a role.
    pub async fn update(
        &self,
        user_id: i32,
        input: ChangeUser,
        actor_is_admin: bool,
    ) -> Result<User, UserServiceError> {
        let mut form = UpdateUser::default();

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(invalid("Name cannot be empty"));
            }
            form.name = Some(name);
        }

        if let Some(email) = input.email {
            let email = email.trim().to_lowercase();
            if !is_valid_email(&email) {
                return Err(invalid("Invalid email address"));
            }
            form.email = Some(email);
        }

        if let Some(role) = input.role {
            if !actor_is_admin {
                return Err(UserServiceError::RoleChangeDenied);
            }
            let role = role
                .parse::<UserRole>()
                .map_err(|_| invalid(format!("{role} is not a valid role")))?;
            form.role = Some(role.as_str().to_string());
        }

        if let Some(password) = input.password {
            check_password_policy(&password).map_err(invalid)?;
            let hash = self
                .passwords
                .hash_password(&password)
                .await
                .map_err(|_| UserServiceError::HashingError)?;
            form.password_hash = Some(hash);
        }

        let user = self
            .repo
            .update(user_id, form)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    UserServiceError::DuplicateEmail
                } else {
                    e.into()
                }
            })?
            .ok_or(UserServiceError::UserNotFound)?;

        tracing::info!(user_id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, user_id: i32) -> Result<(), UserServiceError> {
        match self.repo.delete(user_id).await {
            Ok(true) => {
                tracing::info!(user_id, "User deleted");
                Ok(())
            }
            Ok(false) => Err(UserServiceError::UserNotFound),
            Err(e) if is_foreign_key_violation(&e) => Err(UserServiceError::UserInUse),
            Err(e) => Err(e.into()),
        }
    }
}
