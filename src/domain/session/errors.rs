//! Authentication errors.
//!
//! These errors describe why a request is not allowed through the auth gate,
//! independent of how the HTTP layer renders them.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `session_id` cookie on the request.
    #[error("unauthorized: session cookie not found")]
    MissingSession,

    /// Token is not known to the session store.
    #[error("session expired or invalid")]
    InvalidSession,

    /// Token is known but its expiry has passed.
    #[error("session expired or invalid")]
    SessionExpired,

    /// Authenticated, but the role does not permit the action.
    #[error("forbidden: admin role required")]
    Forbidden,

    #[error("session store error: {0}")]
    Infrastructure(String),
}

impl AuthError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    /// Returns true if the client should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingSession | AuthError::InvalidSession | AuthError::SessionExpired
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::MissingSession | AuthError::InvalidSession | AuthError::SessionExpired => {
                ErrorCode::Unauthorized
            }
            AuthError::Forbidden => ErrorCode::Forbidden,
            AuthError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}
