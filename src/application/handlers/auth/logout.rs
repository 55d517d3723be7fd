//! LogoutHandler - destroys the caller's session.

use std::sync::Arc;

use crate::domain::foundation::SessionToken;
use crate::domain::session::AuthError;
use crate::ports::SessionStore;

pub struct LogoutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Deletes the session. Logging out twice is not an error.
    pub async fn handle(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions
            .delete(token)
            .await
            .map_err(|e| AuthError::infrastructure(e.to_string()))?;
        tracing::info!(token = ?token, "Session destroyed");
        Ok(())
    }
}
