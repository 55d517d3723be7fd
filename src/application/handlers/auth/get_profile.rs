//! GetProfileHandler - Query handler for the caller's own profile.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{AccountError, UserProfile};
use crate::ports::UserRepository;

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<UserProfile, AccountError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(AccountError::NotFound(user_id))
    }
}
