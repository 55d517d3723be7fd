//! Song entity and its rating aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{require_text, SongId, Timestamp, ValidationError};

/// Maximum length for a song title.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum length for a song's full title.
pub const MAX_FULL_TITLE_LENGTH: usize = 150;

/// Counts of valid reviews for one song, split by verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewTally {
    pub likes: i64,
    pub dislikes: i64,
}

/// Denormalized like/dislike/rating counters stored on a song.
///
/// # Invariants
///
/// - `rating == like_count - dislike_count`
/// - both counts are non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub like_count: i64,
    pub dislike_count: i64,
    pub rating: i64,
}

impl RatingAggregate {
    /// Aggregate of a song with no counted reviews.
    pub const ZERO: RatingAggregate = RatingAggregate {
        like_count: 0,
        dislike_count: 0,
        rating: 0,
    };

    pub fn from_tally(tally: ReviewTally) -> Self {
        Self {
            like_count: tally.likes,
            dislike_count: tally.dislikes,
            rating: tally.likes - tally.dislikes,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.like_count >= 0
            && self.dislike_count >= 0
            && self.rating == self.like_count - self.dislike_count
    }
}

/// Validated input for a new catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    title: String,
    full_title: String,
    image_url: String,
    release_date: Option<NaiveDate>,
}

impl NewSong {
    pub fn new(
        title: String,
        full_title: String,
        image_url: String,
        release_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        require_text("title", &title, MAX_TITLE_LENGTH)?;
        require_text("full_title", &full_title, MAX_FULL_TITLE_LENGTH)?;

        Ok(Self {
            title,
            full_title,
            image_url,
            release_date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn full_title(&self) -> &str {
        &self.full_title
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }
}

/// Partial update of a song's catalog fields.
///
/// Aggregate counters are absent on purpose: only recompute writes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongChanges {
    pub title: Option<String>,
    pub full_title: Option<String>,
    pub image_url: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl SongChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.full_title.is_none()
            && self.image_url.is_none()
            && self.release_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title, MAX_TITLE_LENGTH)?;
        }
        if let Some(full_title) = &self.full_title {
            require_text("full_title", full_title, MAX_FULL_TITLE_LENGTH)?;
        }
        Ok(())
    }
}

/// A catalog entry with its denormalized rating aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    id: SongId,
    title: String,
    full_title: String,
    image_url: String,
    release_date: Option<NaiveDate>,
    aggregate: RatingAggregate,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Song {
    /// Builds the stored form of a freshly inserted song.
    pub fn from_new(id: SongId, new: NewSong, now: Timestamp) -> Self {
        Self {
            id,
            title: new.title,
            full_title: new.full_title,
            image_url: new.image_url,
            release_date: new.release_date,
            aggregate: RatingAggregate::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a song from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SongId,
        title: String,
        full_title: String,
        image_url: String,
        release_date: Option<NaiveDate>,
        aggregate: RatingAggregate,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            full_title,
            image_url,
            release_date,
            aggregate,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn full_title(&self) -> &str {
        &self.full_title
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    pub fn aggregate(&self) -> RatingAggregate {
        self.aggregate
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

    /// Applies a validated partial update to the catalog fields.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if a supplied title is blank or too long
    pub fn apply(&mut self, changes: SongChanges, now: Timestamp) -> Result<(), ValidationError> {
        changes.validate()?;
        if changes.is_empty() {
            return Ok(());
        }

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(full_title) = changes.full_title {
            self.full_title = full_title;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = image_url;
        }
        if let Some(release_date) = changes.release_date {
            self.release_date = Some(release_date);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Returns the song reporting `aggregate` instead of its current
    /// counters. Used for windowed rankings; `updated_at` is unchanged.
    pub fn with_aggregate(mut self, aggregate: RatingAggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Replaces the aggregate with freshly recomputed counters.
    pub fn set_aggregate(&mut self, aggregate: RatingAggregate, now: Timestamp) {
        self.aggregate = aggregate;
        self.updated_at = now;
    }
}
