//! ChangePasswordHandler - replaces the caller's password.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{validate_password, AccountError};
use crate::ports::{PasswordHasher, UserRepository};
use super::credentials::{hash_password, verify_password};

/// Command to change a password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
}

pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// # Errors
    ///
    /// - `Validation` if the new password is too short
    /// - `IncorrectOldPassword` if the old password does not verify
    /// - `PasswordUnchanged` if the new password equals the old one
    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AccountError> {
        validate_password(cmd.new_password.expose_secret())?;

        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or(AccountError::NotFound(cmd.user_id))?;

        if !verify_password(&self.hasher, &cmd.old_password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Password change with wrong old password");
            return Err(AccountError::IncorrectOldPassword);
        }
        if verify_password(&self.hasher, &cmd.new_password, &user.password_hash).await? {
            return Err(AccountError::PasswordUnchanged);
        }

        let password_hash = hash_password(&self.hasher, &cmd.new_password).await?;
        user.set_password_hash(password_hash, Timestamp::now());
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
