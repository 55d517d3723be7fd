//! CreateReviewHandler - Command handler for posting a review.

use std::sync::Arc;

use super::recompute::{recompute_after_write, ReviewPolicy};
use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{ErrorCode, SongId, UserId};
use crate::domain::review::{NewReview, Review, ReviewError};
use crate::domain::song::RatingAggregate;
use crate::ports::{ReviewRepository, SongRepository};

/// Command to create a review.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub user_id: UserId,
    pub song_id: SongId,
    pub body: String,
    pub is_like: bool,
}

/// Result of successful review creation.
#[derive(Debug, Clone)]
pub struct CreateReviewResult {
    pub review: Review,
    pub aggregate: RatingAggregate,
}

/// Handler for creating reviews.
pub struct CreateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    songs: Arc<dyn SongRepository>,
    aggregator: Arc<RatingAggregator>,
    policy: ReviewPolicy,
}

impl CreateReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        songs: Arc<dyn SongRepository>,
        aggregator: Arc<RatingAggregator>,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            reviews,
            songs,
            aggregator,
            policy,
        }
    }

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<CreateReviewResult, ReviewError> {
        // 1. Validate input
        let new_review = NewReview::new(cmd.user_id, cmd.song_id, cmd.body, cmd.is_like)?;

        // 2. Song must exist
        if !self.songs.exists(cmd.song_id).await? {
            return Err(ReviewError::SongNotFound(cmd.song_id));
        }

        // 3. Persist
        let review = self.reviews.create(&new_review).await.map_err(|e| {
            if e.code == ErrorCode::SongNotFound {
                ReviewError::SongNotFound(cmd.song_id)
            } else {
                tracing::error!(song_id = %cmd.song_id, error = %e, "Failed to create review");
                ReviewError::from(e)
            }
        })?;

        tracing::info!(
            review_id = %review.id(),
            song_id = %review.song_id(),
            user_id = %review.user_id(),
            is_like = review.is_like(),
            "Review created"
        );

        // 4. Recompute the song's aggregate
        let aggregate = recompute_after_write(
            &self.aggregator,
            self.policy,
            review.id(),
            review.song_id(),
            self.reviews.delete(review.id()),
        )
        .await?;

        Ok(CreateReviewResult { review, aggregate })
    }
}
