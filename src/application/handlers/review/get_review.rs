//! GetReviewHandler - Query handler for a single review.

use std::sync::Arc;

use crate::domain::foundation::ReviewId;
use crate::domain::review::ReviewError;
use crate::ports::{ReviewReader, ReviewView};

/// Handler for retrieving one review with its author and song.
pub struct GetReviewHandler {
    reader: Arc<dyn ReviewReader>,
}

impl GetReviewHandler {
    pub fn new(reader: Arc<dyn ReviewReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, review_id: ReviewId) -> Result<ReviewView, ReviewError> {
        self.reader
            .get(review_id)
            .await?
            .ok_or(ReviewError::NotFound(review_id))
    }
}
