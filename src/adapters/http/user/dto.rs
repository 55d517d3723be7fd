//! HTTP DTOs for user rankings.

use serde::{Deserialize, Serialize};

use crate::ports::TopReviewer;

/// Query parameters for `GET /api/users/top-reviewers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopReviewersParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopReviewerResponse {
    pub id: i64,
    pub username: String,
    pub avatar_url: String,
    pub review_count: i64,
}

impl From<TopReviewer> for TopReviewerResponse {
    fn from(reviewer: TopReviewer) -> Self {
        Self {
            id: reviewer.id.value(),
            username: reviewer.username,
            avatar_url: reviewer.avatar_url,
            review_count: reviewer.review_count,
        }
    }
}
