//! UpdateProfileHandler - edits the caller's email, username, or avatar.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{AccountError, UserChanges, UserProfile};
use crate::ports::UserRepository;

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Absent fields are left as they are. A new email that belongs to
    /// another account is `DuplicateEmail`.
    pub async fn handle(
        &self,
        user_id: UserId,
        changes: UserChanges,
    ) -> Result<UserProfile, AccountError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::NotFound(user_id))?;

        if changes.is_empty() {
            return Ok(user.profile());
        }

        user.apply(changes, Timestamp::now())?;
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user.profile())
    }
}
