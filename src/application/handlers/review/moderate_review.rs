//! ModerateReviewHandler - Admin command to include or exclude a review
//! from its song's aggregate.

use std::sync::Arc;

use super::recompute::{recompute_after_write, ReviewPolicy};
use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{ReviewId, Timestamp, UserId};
use crate::domain::review::{Review, ReviewError};
use crate::domain::song::RatingAggregate;
use crate::ports::ReviewRepository;

/// Command to set a review's moderation flag.
#[derive(Debug, Clone)]
pub struct ModerateReviewCommand {
    pub review_id: ReviewId,
    pub moderator: UserId,
    pub is_valid: bool,
}

/// Result of a moderation decision.
#[derive(Debug, Clone)]
pub struct ModerateReviewResult {
    pub review: Review,
    /// Present only when the flag changed and the aggregate was recomputed.
    pub aggregate: Option<RatingAggregate>,
}

/// Handler for review moderation.
pub struct ModerateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    aggregator: Arc<RatingAggregator>,
    policy: ReviewPolicy,
}

impl ModerateReviewHandler {
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

    pub async fn handle(
        &self,
        cmd: ModerateReviewCommand,
    ) -> Result<ModerateReviewResult, ReviewError> {
        let prior = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        let mut review = prior.clone();
        if !review.set_validity(cmd.is_valid, Timestamp::now()) {
            return Ok(ModerateReviewResult {
                review,
                aggregate: None,
            });
        }

        self.reviews.update(&review).await.map_err(|e| {
            if e.is_not_found() {
                ReviewError::NotFound(cmd.review_id)
            } else {
                tracing::error!(review_id = %cmd.review_id, error = %e, "Failed to moderate review");
                ReviewError::from(e)
            }
        })?;

        tracing::info!(
            review_id = %review.id(),
            song_id = %review.song_id(),
            moderator = %cmd.moderator,
            is_valid = cmd.is_valid,
            "Review moderated"
        );

        let aggregate = recompute_after_write(
            &self.aggregator,
            self.policy,
            review.id(),
            review.song_id(),
            self.reviews.update(&prior),
        )
        .await?;

        Ok(ModerateReviewResult {
            review,
            aggregate: Some(aggregate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;

    fn cmd(review_id: ReviewId, is_valid: bool) -> ModerateReviewCommand {
        ModerateReviewCommand {
            review_id,
            moderator: UserId::from_db(4),
            is_valid,
        }
    }

    #[tokio::test]
    async fn invalidating_review_removes_it_from_aggregate() {
        let h = Harness::new().await;
        let id = h.seed_review(true).await;
        h.seed_review(true).await;

        let result = h
            .moderate_handler_with(ReviewPolicy::default())
            .handle(cmd(id, false))
            .await
            .unwrap();

        assert_eq!(result.aggregate, Some(h.aggregate(1, 0)));
        assert!(!result.review.is_valid());
    }

    #[tokio::test]
    async fn revalidating_review_counts_it_again() {
        let h = Harness::new().await;
        let id = h.seed_review(false).await;
        let handler = h.moderate_handler_with(ReviewPolicy::default());

        handler.handle(cmd(id, false)).await.unwrap();
        assert_eq!(h.stored_aggregate().await, h.aggregate(0, 0));

        handler.handle(cmd(id, true)).await.unwrap();
        assert_eq!(h.stored_aggregate().await, h.aggregate(0, 1));
    }

    #[tokio::test]
    async fn unchanged_flag_skips_write_and_recompute() {
        let h = Harness::new().await;
        let id = h.seed_review(true).await;
        h.fail_aggregate_writes();

        let result = h
            .moderate_handler_with(ReviewPolicy::default())
            .handle(cmd(id, true))
            .await
            .unwrap();

        assert!(result.aggregate.is_none());
    }

    #[tokio::test]
    async fn rollback_restores_validity() {
        let h = Harness::new().await;
        let id = h.seed_review(true).await;
        h.fail_aggregate_writes();

        let result = h
            .moderate_handler_with(ReviewPolicy::with_rollback())
            .handle(cmd(id, false))
            .await;

        assert!(matches!(
            result,
            Err(ReviewError::AggregateStale { rolled_back: true, .. })
        ));
        assert!(h.stored_review(id).await.unwrap().is_valid());
    }
}
