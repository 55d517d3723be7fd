//! Review entity.
//!
//! A review is one user's verdict (like or dislike) on one song. Only valid
//! reviews count toward the song's rating aggregate.

use crate::domain::foundation::{ReviewId, SongId, Timestamp, UserId, ValidationError};

/// Validated input for a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    user_id: UserId,
    song_id: SongId,
    body: String,
    is_like: bool,
}

impl NewReview {
    /// # Errors
    ///
    /// - `EmptyField` if the body is blank
    pub fn new(
        user_id: UserId,
        song_id: SongId,
        body: String,
        is_like: bool,
    ) -> Result<Self, ValidationError> {
        validate_body(&body)?;
        Ok(Self {
            user_id,
            song_id,
            body,
            is_like,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn song_id(&self) -> SongId {
        self.song_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_like(&self) -> bool {
        self.is_like
    }
}

/// Partial update of a review's author-editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub body: Option<String>,
    pub is_like: Option<bool>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.is_like.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(body) = &self.body {
            validate_body(body)?;
        }
        Ok(())
    }
}

fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::empty_field("body"));
    }
    Ok(())
}

/// A stored review.
///
/// # Invariants
///
/// - `body` is never blank
/// - `song_id` and `user_id` never change after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    user_id: UserId,
    song_id: SongId,
    body: String,
    is_like: bool,
    is_valid: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Review {
    /// Builds the stored form of a freshly inserted review. New reviews are
    /// always valid.
    pub fn from_new(id: ReviewId, new: NewReview, now: Timestamp) -> Self {
        Self {
            id,
            user_id: new.user_id,
            song_id: new.song_id,
            body: new.body,
            is_like: new.is_like,
            is_valid: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a review from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReviewId,
        user_id: UserId,
        song_id: SongId,
        body: String,
        is_like: bool,
        is_valid: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            song_id,
            body,
            is_like,
            is_valid,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn song_id(&self) -> SongId {
        self.song_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_like(&self) -> bool {
        self.is_like
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update.
    ///
    /// Returns `true` when the verdict changed, meaning the song's aggregate
    /// must be recomputed. An empty change set is a no-op.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a supplied body is blank
    pub fn apply(&mut self, changes: ReviewChanges, now: Timestamp) -> Result<bool, ValidationError> {
        changes.validate()?;
        if changes.is_empty() {
            return Ok(false);
        }

        let prior_is_like = self.is_like;
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(is_like) = changes.is_like {
            self.is_like = is_like;
        }
        self.updated_at = now;

        Ok(self.is_like != prior_is_like)
    }

    /// Sets the moderation flag. Returns `true` when it changed.
    pub fn set_validity(&mut self, is_valid: bool, now: Timestamp) -> bool {
        if self.is_valid == is_valid {
            return false;
        }
        self.is_valid = is_valid;
        self.updated_at = now;
        true
    }
}
