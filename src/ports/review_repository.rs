//! Review repository port (write side).
//!
//! Persists reviews. Implementations never touch song aggregates; the
//! application layer triggers a recompute after each relevant write.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReviewId};
use crate::domain::review::{NewReview, Review};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review with `is_valid = true`.
    ///
    /// # Errors
    ///
    /// - `SongNotFound` if the referenced song does not exist
    /// - `DatabaseError` on persistence failure
    async fn create(&self, review: &NewReview) -> Result<Review, DomainError>;

    /// Find a review by id. Returns `None` if not found.
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError>;

    /// Write back body, verdict, validity, and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review no longer exists
    async fn update(&self, review: &Review) -> Result<(), DomainError>;

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review does not exist
    async fn delete(&self, id: ReviewId) -> Result<(), DomainError>;

    /// Re-insert a previously deleted review under its original id.
    ///
    /// Used only to compensate a delete whose recompute failed.
    async fn restore(&self, review: &Review) -> Result<(), DomainError>;
}
