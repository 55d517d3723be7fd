use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SongId, ValidationError};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, Error)]
pub enum SongError {
    #[error("Song not found: {0}")]
    NotFound(SongId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Catalog storage error: {0}")]
    Infrastructure(String),
}

impl SongError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SongError::NotFound(_) => ErrorCode::SongNotFound,
            SongError::Validation(_) => ErrorCode::ValidationFailed,
            SongError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Converts a port error, attributing not-found to the given song.
    pub fn from_domain(song_id: SongId, err: DomainError) -> Self {
        if err.code == ErrorCode::SongNotFound {
            SongError::NotFound(song_id)
        } else {
            SongError::Infrastructure(err.to_string())
        }
    }
}

impl From<DomainError> for SongError {
    fn from(err: DomainError) -> Self {
        SongError::Infrastructure(err.to_string())
    }
}
