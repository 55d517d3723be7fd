//! Review reader port (read side).
//!
//! Review listings embed summaries of the author and the song so clients
//! can render a review without follow-up requests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ReviewId, SongId, Timestamp, UserId};

#[async_trait]
pub trait ReviewReader: Send + Sync {
    /// All reviews, newest first.
    async fn list(&self) -> Result<Vec<ReviewView>, DomainError>;

    /// One review by id. Returns `None` if not found.
    async fn get(&self, id: ReviewId) -> Result<Option<ReviewView>, DomainError>;

    /// Reviews written by one user, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ReviewView>, DomainError>;
}

/// Author fields embedded in a review view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
}

/// Song fields embedded in a review view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedSong {
    pub id: SongId,
    pub title: String,
    pub full_title: String,
    pub image_url: String,
    pub release_date: Option<NaiveDate>,
}

/// Read model for a single review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub body: String,
    pub is_like: bool,
    pub is_valid: bool,
    pub user: ReviewAuthor,
    pub song: ReviewedSong,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
