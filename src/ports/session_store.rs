//! Session store port.
//!
//! Holds live login sessions keyed by token. Lookups never check expiry;
//! that decision belongs to the auth gate so an expired session can still
//! be inspected or deleted.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionToken, Timestamp};
use crate::domain::session::Session;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session, overwriting any entry with the same token.
    async fn save(&self, session: Session) -> Result<(), DomainError>;

    /// Look up a session by token. Expired sessions are still returned.
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;

    /// Remove a session. Deleting an unknown token is not an error.
    async fn delete(&self, token: &SessionToken) -> Result<(), DomainError>;

    /// Remove every session whose expiry lies before `now`.
    ///
    /// Returns the number of sessions removed.
    async fn purge_expired(&self, now: &Timestamp) -> Result<usize, DomainError>;

    /// Number of stored sessions, expired ones included.
    async fn len(&self) -> Result<usize, DomainError>;
}
