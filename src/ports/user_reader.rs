//! User reader port (read side).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserReader: Send + Sync {
    /// Users with at least one valid review, most valid reviews first.
    /// Ties are broken by ascending id.
    async fn top_reviewers(&self, limit: u32) -> Result<Vec<TopReviewer>, DomainError>;
}

/// A ranked reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopReviewer {
    pub id: UserId,
    pub username: String,
    pub avatar_url: String,
    pub review_count: i64,
}
