//! Song catalog query handlers.

use std::sync::Arc;

use crate::domain::foundation::SongId;
use crate::domain::song::{Song, SongError, TimeRange, DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT};
use crate::ports::{SongReader, SongRepository};

/// Handler for listing songs, optionally sorted by stored rating.
pub struct ListSongsHandler {
    reader: Arc<dyn SongReader>,
}

impl ListSongsHandler {
    pub fn new(reader: Arc<dyn SongReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<Vec<Song>, SongError> {
        Ok(self.reader.list().await?)
    }

    pub async fn sorted_by_rating(&self) -> Result<Vec<Song>, SongError> {
        Ok(self.reader.sorted_by_rating().await?)
    }
}

/// Query for the best-rated songs within a time window.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopSongsQuery {
    pub range: TimeRange,
    pub limit: Option<u32>,
}

impl TopSongsQuery {
    /// Limit after applying the default and clamping to `1..=MAX_TOP_LIMIT`.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_TOP_LIMIT)
            .clamp(1, MAX_TOP_LIMIT)
    }
}

pub struct TopSongsHandler {
    reader: Arc<dyn SongReader>,
}

impl TopSongsHandler {
    pub fn new(reader: Arc<dyn SongReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: TopSongsQuery) -> Result<Vec<Song>, SongError> {
        Ok(self
            .reader
            .top(query.range, query.effective_limit())
            .await?)
    }
}

pub struct GetSongHandler {
    songs: Arc<dyn SongRepository>,
}

impl GetSongHandler {
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }

    pub async fn handle(&self, song_id: SongId) -> Result<Song, SongError> {
        self.songs
            .find_by_id(song_id)
            .await?
            .ok_or(SongError::NotFound(song_id))
    }
}
