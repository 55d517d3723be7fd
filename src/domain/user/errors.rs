use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by registration, login, and profile operations.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is banned")]
    Banned,

    #[error("Invalid old password")]
    IncorrectOldPassword,

    #[error("New password must be different from the old one")]
    PasswordUnchanged,

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Account storage error: {0}")]
    Infrastructure(String),
}

impl AccountError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::Validation(_) => ErrorCode::ValidationFailed,
            AccountError::DuplicateEmail => ErrorCode::Conflict,
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::Banned => ErrorCode::Forbidden,
            AccountError::IncorrectOldPassword | AccountError::PasswordUnchanged => {
                ErrorCode::ValidationFailed
            }
            AccountError::NotFound(_) => ErrorCode::UserNotFound,
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => AccountError::DuplicateEmail,
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_duplicate_email() {
        let err: AccountError = DomainError::new(ErrorCode::Conflict, "email taken").into();
        assert!(matches!(err, AccountError::DuplicateEmail));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err: AccountError = DomainError::database("timeout").into();
        assert!(matches!(err, AccountError::Infrastructure(_)));
    }

    #[test]
    fn password_change_rejections_are_client_errors() {
        assert_eq!(
            AccountError::IncorrectOldPassword.code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(AccountError::PasswordUnchanged.code(), ErrorCode::ValidationFailed);
    }
}
