//! RegisterUserHandler - Command handler for creating an account.

use std::sync::Arc;

use secrecy::Secret;

use crate::domain::foundation::RoleId;
use crate::domain::user::{AccountError, NewUser, Registration, UserProfile};
use crate::ports::{PasswordHasher, UserRepository};
use super::credentials::hash_password;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub username: String,
    pub password: Secret<String>,
}

/// Handler for account registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<UserProfile, AccountError> {
        let registration = Registration::new(cmd.email, cmd.username, cmd.password)?;

        if self
            .users
            .find_by_email(registration.email())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail);
        }

        let password_hash = hash_password(&self.hasher, registration.password()).await?;

        let user = self
            .users
            .create(&NewUser {
                email: registration.email().to_string(),
                username: registration.username().to_string(),
                password_hash,
                role_id: RoleId::USER,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.profile())
    }
}
