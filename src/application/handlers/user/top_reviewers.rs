//! TopReviewersHandler - ranks users by their number of valid reviews.

use std::sync::Arc;

use crate::domain::user::{AccountError, DEFAULT_REVIEWER_LIMIT, MAX_REVIEWER_LIMIT};
use crate::ports::{TopReviewer, UserReader};

#[derive(Debug, Clone, Copy, Default)]
pub struct TopReviewersQuery {
    pub limit: Option<u32>,
}

impl TopReviewersQuery {
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_REVIEWER_LIMIT)
            .clamp(1, MAX_REVIEWER_LIMIT)
    }
}

pub struct TopReviewersHandler {
    reader: Arc<dyn UserReader>,
}

impl TopReviewersHandler {
    pub fn new(reader: Arc<dyn UserReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: TopReviewersQuery) -> Result<Vec<TopReviewer>, AccountError> {
        Ok(self.reader.top_reviewers(query.effective_limit()).await?)
    }
}
