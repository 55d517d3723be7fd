//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Find an account by email. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by id. Returns `None` if not found.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Write back email, username, avatar, password hash, and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account does not exist
    /// - `Conflict` if the new email belongs to another account
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
