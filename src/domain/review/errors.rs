//! Review lifecycle errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, SongId, ValidationError};

#[derive(Debug, Clone, Error)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(ReviewId),

    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The review write itself failed; nothing was committed.
    #[error("Review storage error: {0}")]
    Infrastructure(String),

    /// The review write committed but the song's aggregate could not be
    /// recomputed afterwards. `rolled_back` is true when the review change
    /// was compensated before reporting.
    #[error("Rating for song {song_id} is stale after change to review {review_id}: {reason}")]
    AggregateStale {
        review_id: ReviewId,
        song_id: SongId,
        rolled_back: bool,
        reason: String,
    },
}

impl ReviewError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::NotFound(_) => ErrorCode::ReviewNotFound,
            ReviewError::SongNotFound(_) => ErrorCode::SongNotFound,
            ReviewError::Validation(_) => ErrorCode::ValidationFailed,
            ReviewError::Infrastructure(_) | ReviewError::AggregateStale { .. } => {
                ErrorCode::InternalError
            }
        }
    }
}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        ReviewError::Infrastructure(err.to_string())
    }
}
