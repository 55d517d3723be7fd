//! DeleteReviewHandler - Command handler for removing a review.

use std::sync::Arc;

use super::recompute::{recompute_after_write, ReviewPolicy};
use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{ReviewId, UserId};
use crate::domain::review::ReviewError;
use crate::domain::song::RatingAggregate;
use crate::ports::ReviewRepository;

/// Command to delete a review.
#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub review_id: ReviewId,
    pub requested_by: UserId,
}

/// Handler for deleting reviews.
pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    aggregator: Arc<RatingAggregator>,
    policy: ReviewPolicy,
}

impl DeleteReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        aggregator: Arc<RatingAggregator>,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            reviews,
            aggregator,
            policy,
        }
    }

    /// Deletes the review and returns the song's recomputed aggregate.
    pub async fn handle(&self, cmd: DeleteReviewCommand) -> Result<RatingAggregate, ReviewError> {
        let review = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        self.reviews.delete(review.id()).await.map_err(|e| {
            if e.is_not_found() {
                ReviewError::NotFound(cmd.review_id)
            } else {
                tracing::error!(review_id = %cmd.review_id, error = %e, "Failed to delete review");
                ReviewError::from(e)
            }
        })?;

        tracing::info!(
            review_id = %review.id(),
            song_id = %review.song_id(),
            requested_by = %cmd.requested_by,
            "Review deleted"
        );

        recompute_after_write(
            &self.aggregator,
            self.policy,
            review.id(),
            review.song_id(),
            self.reviews.restore(&review),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;

    fn cmd(review_id: ReviewId) -> DeleteReviewCommand {
        DeleteReviewCommand {
            review_id,
            requested_by: UserId::from_db(1),
        }
    }

    #[tokio::test]
    async fn delete_recomputes_to_zero() {
        let h = Harness::new().await;
        let id = h.seed_review(false).await;
        assert_eq!(h.stored_aggregate().await.rating, -1);

        let aggregate = h
            .delete_handler_with(ReviewPolicy::default())
            .handle(cmd(id))
            .await
            .unwrap();

        assert_eq!(aggregate, h.aggregate(0, 0));
        assert!(h.stored_review(id).await.is_none());
    }

    #[tokio::test]
    async fn missing_review_is_not_found() {
        let h = Harness::new().await;

        let result = h
            .delete_handler_with(ReviewPolicy::default())
            .handle(cmd(ReviewId::from_db(3)))
            .await;

        assert!(matches!(result, Err(ReviewError::NotFound(_))));
    }

    #[tokio::test]
    async fn rollback_restores_deleted_review_with_original_id() {
        let h = Harness::new().await;
        let id = h.seed_review(true).await;
        let original = h.stored_review(id).await.unwrap();
        h.fail_aggregate_writes();

        let result = h
            .delete_handler_with(ReviewPolicy::with_rollback())
            .handle(cmd(id))
            .await;

        assert!(matches!(
            result,
            Err(ReviewError::AggregateStale { rolled_back: true, .. })
        ));
        assert_eq!(h.stored_review(id).await, Some(original));
        assert_eq!(h.stored_aggregate().await, h.aggregate(1, 0));
    }
}
