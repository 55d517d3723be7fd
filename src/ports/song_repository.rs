//! Song repository port (write side).
//!
//! Besides catalog CRUD this port exposes the two primitives the rating
//! aggregator needs: counting valid reviews and writing the aggregate back.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SongId};
use crate::domain::song::{NewSong, RatingAggregate, ReviewTally, Song};

#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Check whether a song exists.
    async fn exists(&self, id: SongId) -> Result<bool, DomainError>;

    /// Count valid reviews for a song, split by verdict.
    async fn count_reviews(&self, id: SongId) -> Result<ReviewTally, DomainError>;

    /// Overwrite the aggregate counters and `updated_at` in one write.
    ///
    /// # Errors
    ///
    /// - `SongNotFound` if the song does not exist
    async fn write_rating_aggregate(
        &self,
        id: SongId,
        aggregate: RatingAggregate,
    ) -> Result<(), DomainError>;

    /// Insert a new song with a zero aggregate.
    async fn create(&self, song: &NewSong) -> Result<Song, DomainError>;

    /// Find a song by id. Returns `None` if not found.
    async fn find_by_id(&self, id: SongId) -> Result<Option<Song>, DomainError>;

    /// Write back catalog fields. The aggregate columns are left untouched.
    ///
    /// # Errors
    ///
    /// - `SongNotFound` if the song does not exist
    async fn update(&self, song: &Song) -> Result<(), DomainError>;

    /// Delete a song and, by cascade, its reviews.
    ///
    /// # Errors
    ///
    /// - `SongNotFound` if the song does not exist
    async fn delete(&self, id: SongId) -> Result<(), DomainError>;
}
