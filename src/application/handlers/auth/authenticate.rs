//! SessionAuthenticator - resolves a session cookie into a live session and
//! checks role requirements.
//!
//! The HTTP auth gate calls this in two stages: `authenticate` for every
//! protected route, `authorize_admin` additionally for admin routes.

use std::sync::Arc;

use crate::domain::foundation::{RoleId, SessionToken, Timestamp};
use crate::domain::session::{AuthError, Session};
use crate::ports::SessionStore;

pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionStore>,
    admin_role: RoleId,
}

impl SessionAuthenticator {
    pub fn new(sessions: Arc<dyn SessionStore>, admin_role: RoleId) -> Self {
        Self {
            sessions,
            admin_role,
        }
    }

    /// Resolves a token into a session that has not yet expired.
    ///
    /// # Errors
    ///
    /// - `MissingSession` if no token was presented
    /// - `InvalidSession` if the token is unknown
    /// - `SessionExpired` if the session's expiry has passed
    pub async fn authenticate(&self, token: Option<SessionToken>) -> Result<Session, AuthError> {
        self.authenticate_at(token, &Timestamp::now()).await
    }

    pub async fn authenticate_at(
        &self,
        token: Option<SessionToken>,
        now: &Timestamp,
    ) -> Result<Session, AuthError> {
        let token = token.ok_or(AuthError::MissingSession)?;

        let session = self
            .sessions
            .get(&token)
            .await
            .map_err(|e| AuthError::infrastructure(e.to_string()))?
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired_at(now) {
            tracing::debug!(user_id = %session.user_id, "Rejected expired session");
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// Checks that an authenticated session carries the admin role.
    ///
    /// # Errors
    ///
    /// - `MissingSession` if no session was resolved first
    /// - `Forbidden` if the role is not admin
    pub fn authorize_admin(&self, session: Option<&Session>) -> Result<(), AuthError> {
        let session = session.ok_or(AuthError::MissingSession)?;
        if !session.has_role(self.admin_role) {
            tracing::warn!(
                user_id = %session.user_id,
                role_id = %session.role_id,
                "Non-admin session rejected from admin route"
            );
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }
}
