//! DeleteSongHandler - Admin command for removing a song and its reviews.

use std::sync::Arc;

use crate::domain::foundation::SongId;
use crate::domain::song::SongError;
use crate::ports::SongRepository;

pub struct DeleteSongHandler {
    songs: Arc<dyn SongRepository>,
}

impl DeleteSongHandler {
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }

    pub async fn handle(&self, song_id: SongId) -> Result<(), SongError> {
        self.songs
            .delete(song_id)
            .await
            .map_err(|e| SongError::from_domain(song_id, e))?;
        tracing::info!(song_id = %song_id, "Song deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDatabase, InMemorySongRepository};
    use crate::domain::song::NewSong;

    #[tokio::test]
    async fn deletes_existing_then_reports_not_found() {
        let repo = Arc::new(InMemorySongRepository::new(InMemoryDatabase::new()));
        let song = repo
            .create(&NewSong::new("Gone".into(), "Gone full".into(), String::new(), None).unwrap())
            .await
            .unwrap();
        let handler = DeleteSongHandler::new(repo.clone());

        handler.handle(song.id()).await.unwrap();

        assert!(repo.find_by_id(song.id()).await.unwrap().is_none());
        assert!(matches!(
            handler.handle(song.id()).await,
            Err(SongError::NotFound(_))
        ));
    }
}
