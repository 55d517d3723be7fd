//! Shared write-then-recompute step for review commands.

use std::future::Future;

use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{DomainError, ReviewId, SongId};
use crate::domain::review::ReviewError;
use crate::domain::song::RatingAggregate;

/// How review commands react when the recompute after a committed write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewPolicy {
    /// Undo the review change before reporting the failure.
    pub rollback_on_recompute_failure: bool,
}

impl ReviewPolicy {
    pub fn with_rollback() -> Self {
        Self {
            rollback_on_recompute_failure: true,
        }
    }
}

/// Recomputes the song's aggregate after a review write.
///
/// On failure the error becomes `AggregateStale`. When the policy asks for
/// it, `compensate` runs first to undo the review write; it is never polled
/// otherwise.
pub(super) async fn recompute_after_write<F>(
    aggregator: &RatingAggregator,
    policy: ReviewPolicy,
    review_id: ReviewId,
    song_id: SongId,
    compensate: F,
) -> Result<RatingAggregate, ReviewError>
where
    F: Future<Output = Result<(), DomainError>> + Send,
{
    let err = match aggregator.recompute(song_id).await {
        Ok(aggregate) => return Ok(aggregate),
        Err(err) => err,
    };

    tracing::error!(
        review_id = %review_id,
        song_id = %song_id,
        error = %err,
        "Failed to recompute song rating after review change"
    );

    let rolled_back = if policy.rollback_on_recompute_failure {
        match compensate.await {
            Ok(()) => {
                tracing::warn!(review_id = %review_id, song_id = %song_id, "Rolled back review change");
                true
            }
            Err(rollback_err) => {
                tracing::error!(
                    review_id = %review_id,
                    song_id = %song_id,
                    error = %rollback_err,
                    "Failed to roll back review change"
                );
                false
            }
        }
    } else {
        false
    };

    Err(ReviewError::AggregateStale {
        review_id,
        song_id,
        rolled_back,
        reason: err.to_string(),
    })
}
