//! CreateSongHandler - Admin command for adding a catalog entry.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::song::{NewSong, Song, SongError};
use crate::ports::SongRepository;

/// Command to create a song.
#[derive(Debug, Clone)]
pub struct CreateSongCommand {
    pub title: String,
    pub full_title: String,
    pub image_url: String,
    pub release_date: Option<NaiveDate>,
}

pub struct CreateSongHandler {
    songs: Arc<dyn SongRepository>,
}

impl CreateSongHandler {
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }

    pub async fn handle(&self, cmd: CreateSongCommand) -> Result<Song, SongError> {
        let new_song = NewSong::new(cmd.title, cmd.full_title, cmd.image_url, cmd.release_date)?;
        let song = self.songs.create(&new_song).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create song");
            SongError::from(e)
        })?;
        tracing::info!(song_id = %song.id(), title = %song.title(), "Song created");
        Ok(song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDatabase, InMemorySongRepository};
    use crate::domain::song::RatingAggregate;

    fn cmd(title: &str) -> CreateSongCommand {
        CreateSongCommand {
            title: title.to_string(),
            full_title: "Full title".to_string(),
            image_url: "https://img.example/cover.png".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 1, 1),
        }
    }

    #[tokio::test]
    async fn creates_song_with_zero_aggregate() {
        let handler =
            CreateSongHandler::new(Arc::new(InMemorySongRepository::new(InMemoryDatabase::new())));

        let song = handler.handle(cmd("Teardrop")).await.unwrap();

        assert_eq!(song.title(), "Teardrop");
        assert_eq!(song.aggregate(), RatingAggregate::ZERO);
    }

    #[tokio::test]
    async fn rejects_overlong_title() {
        let handler =
            CreateSongHandler::new(Arc::new(InMemorySongRepository::new(InMemoryDatabase::new())));

        let result = handler.handle(cmd(&"t".repeat(51))).await;

        assert!(matches!(result, Err(SongError::Validation(_))));
    }
}
