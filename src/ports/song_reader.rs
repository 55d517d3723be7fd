//! Song reader port (read side).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::song::{Song, TimeRange};

#[async_trait]
pub trait SongReader: Send + Sync {
    /// All songs in insertion order.
    async fn list(&self) -> Result<Vec<Song>, DomainError>;

    /// All songs ordered by stored rating descending, then newest first.
    async fn sorted_by_rating(&self) -> Result<Vec<Song>, DomainError>;

    /// Songs ranked by a live count of valid reviews written within `range`.
    ///
    /// The returned aggregates reflect only the window, not the stored
    /// counters. Ordered by rating descending, then likes descending.
    async fn top(&self, range: TimeRange, limit: u32) -> Result<Vec<Song>, DomainError>;
}
