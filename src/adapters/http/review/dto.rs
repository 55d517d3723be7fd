//! HTTP DTOs for review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::review::Review;
use crate::domain::song::RatingAggregate;
use crate::ports::{ReviewAuthor, ReviewView, ReviewedSong};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A missing `song_id` or `body` fails validation downstream; a missing
/// `is_like` counts as a dislike.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub song_id: i64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_like: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_like: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModerateReviewRequest {
    pub is_valid: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Song counters returned alongside a review mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRatingResponse {
    pub like_count: i64,
    pub dislike_count: i64,
    pub rating: i64,
}

impl From<RatingAggregate> for SongRatingResponse {
    fn from(aggregate: RatingAggregate) -> Self {
        Self {
            like_count: aggregate.like_count,
            dislike_count: aggregate.dislike_count,
            rating: aggregate.rating,
        }
    }
}

/// A review after a write, with the song's counters when they were
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub user_id: i64,
    pub song_id: i64,
    pub body: String,
    pub is_like: bool,
    pub is_valid: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_rating: Option<SongRatingResponse>,
}

impl ReviewResponse {
    pub fn new(review: &Review, aggregate: Option<RatingAggregate>) -> Self {
        Self {
            id: review.id().value(),
            user_id: review.user_id().value(),
            song_id: review.song_id().value(),
            body: review.body().to_string(),
            is_like: review.is_like(),
            is_valid: review.is_valid(),
            created_at: review.created_at().as_datetime().to_rfc3339(),
            updated_at: review.updated_at().as_datetime().to_rfc3339(),
            song_rating: aggregate.map(SongRatingResponse::from),
        }
    }
}

/// Listing entry with author and song summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDetailResponse {
    pub id: i64,
    pub body: String,
    pub is_like: bool,
    pub is_valid: bool,
    pub user: ReviewAuthor,
    pub song: ReviewedSong,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewView> for ReviewDetailResponse {
    fn from(view: ReviewView) -> Self {
        Self {
            id: view.id.value(),
            body: view.body,
            is_like: view.is_like,
            is_valid: view.is_valid,
            user: view.user,
            song: view.song,
            created_at: view.created_at.as_datetime().to_rfc3339(),
            updated_at: view.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_without_is_like_is_a_dislike() {
        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"song_id": 3, "body": "meh"}"#).unwrap();
        assert_eq!(req.song_id, 3);
        assert!(!req.is_like);
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateReviewRequest = serde_json::from_str(r#"{"body": "Better"}"#).unwrap();
        assert_eq!(req.body.as_deref(), Some("Better"));
        assert!(req.is_like.is_none());

        let req: UpdateReviewRequest = serde_json::from_str("{}").unwrap();
        assert!(req.body.is_none() && req.is_like.is_none());
    }

    #[test]
    fn song_rating_is_omitted_when_not_recomputed() {
        let response = ReviewResponse {
            id: 1,
            user_id: 2,
            song_id: 3,
            body: "Great".into(),
            is_like: true,
            is_valid: true,
            created_at: String::new(),
            updated_at: String::new(),
            song_rating: None,
        };
        let json = serde_json::to_value(response).unwrap();
        assert!(json.get("song_rating").is_none());
    }
}
