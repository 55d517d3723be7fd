//! Review listing queries.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::review::ReviewError;
use crate::ports::{ReviewReader, ReviewView};

/// Handler for listing every review, newest first.
pub struct ListReviewsHandler {
    reader: Arc<dyn ReviewReader>,
}

impl ListReviewsHandler {
    pub fn new(reader: Arc<dyn ReviewReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<Vec<ReviewView>, ReviewError> {
        Ok(self.reader.list().await?)
    }
}

/// Handler for listing one user's reviews, newest first.
pub struct ListUserReviewsHandler {
    reader: Arc<dyn ReviewReader>,
}

impl ListUserReviewsHandler {
    pub fn new(reader: Arc<dyn ReviewReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<ReviewView>, ReviewError> {
        Ok(self.reader.list_by_user(user_id).await?)
    }
}
