//! UpdateReviewHandler - Command handler for editing a review.
//!
//! Only a change of verdict affects the song's aggregate, so body-only
//! edits skip the recompute.

use std::sync::Arc;

use super::recompute::{recompute_after_write, ReviewPolicy};
use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{ReviewId, Timestamp, UserId};
use crate::domain::review::{Review, ReviewChanges, ReviewError};
use crate::domain::song::RatingAggregate;
use crate::ports::ReviewRepository;

/// Command to partially update a review.
#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub review_id: ReviewId,
    pub requested_by: UserId,
    pub changes: ReviewChanges,
}

/// Result of a review update.
#[derive(Debug, Clone)]
pub struct UpdateReviewResult {
    pub review: Review,
    /// Present only when the verdict changed and the aggregate was recomputed.
    pub aggregate: Option<RatingAggregate>,
}

/// Handler for updating reviews.
pub struct UpdateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    aggregator: Arc<RatingAggregator>,
    policy: ReviewPolicy,
}

impl UpdateReviewHandler {
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

    pub async fn handle(&self, cmd: UpdateReviewCommand) -> Result<UpdateReviewResult, ReviewError> {
        cmd.changes.validate()?;

        // 1. Load
        let prior = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        if cmd.changes.is_empty() {
            return Ok(UpdateReviewResult {
                review: prior,
                aggregate: None,
            });
        }

        // 2. Apply and persist
        let mut review = prior.clone();
        let verdict_changed = review.apply(cmd.changes, Timestamp::now())?;
        self.reviews.update(&review).await.map_err(|e| {
            if e.is_not_found() {
                ReviewError::NotFound(cmd.review_id)
            } else {
                tracing::error!(review_id = %cmd.review_id, error = %e, "Failed to update review");
                ReviewError::from(e)
            }
        })?;

        tracing::info!(
            review_id = %review.id(),
            song_id = %review.song_id(),
            requested_by = %cmd.requested_by,
            verdict_changed,
            "Review updated"
        );

        if !verdict_changed {
            return Ok(UpdateReviewResult {
                review,
                aggregate: None,
            });
        }

        // 3. Recompute only when the verdict flipped
        let aggregate = recompute_after_write(
            &self.aggregator,
            self.policy,
            review.id(),
            review.song_id(),
            self.reviews.update(&prior),
        )
        .await?;

        Ok(UpdateReviewResult {
            review,
            aggregate: Some(aggregate),
        })
    }
}
