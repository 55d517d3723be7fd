//! UpdateSongHandler - Admin command for editing catalog fields.

use std::sync::Arc;

use crate::domain::foundation::{SongId, Timestamp};
use crate::domain::song::{Song, SongChanges, SongError};
use crate::ports::SongRepository;

/// Command to partially update a song.
#[derive(Debug, Clone)]
pub struct UpdateSongCommand {
    pub song_id: SongId,
    pub changes: SongChanges,
}

pub struct UpdateSongHandler {
    songs: Arc<dyn SongRepository>,
}

impl UpdateSongHandler {
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }

    pub async fn handle(&self, cmd: UpdateSongCommand) -> Result<Song, SongError> {
        cmd.changes.validate()?;

        let mut song = self
            .songs
            .find_by_id(cmd.song_id)
            .await?
            .ok_or(SongError::NotFound(cmd.song_id))?;

        if cmd.changes.is_empty() {
            return Ok(song);
        }

        song.apply(cmd.changes, Timestamp::now())?;
        self.songs
            .update(&song)
            .await
            .map_err(|e| SongError::from_domain(cmd.song_id, e))?;

        tracing::info!(song_id = %cmd.song_id, "Song updated");
        Ok(song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDatabase, InMemorySongRepository};
    use crate::domain::song::NewSong;

    async fn seeded() -> (UpdateSongHandler, SongId) {
        let repo = Arc::new(InMemorySongRepository::new(InMemoryDatabase::new()));
        let song = repo
            .create(&NewSong::new("Old".into(), "Old full".into(), String::new(), None).unwrap())
            .await
            .unwrap();
        (UpdateSongHandler::new(repo), song.id())
    }

    #[tokio::test]
    async fn updates_supplied_fields() {
        let (handler, id) = seeded().await;

        let song = handler
            .handle(UpdateSongCommand {
                song_id: id,
                changes: SongChanges {
                    title: Some("New".into()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(song.title(), "New");
        assert_eq!(song.full_title(), "Old full");
    }

    #[tokio::test]
    async fn missing_song_is_not_found() {
        let (handler, _) = seeded().await;

        let result = handler
            .handle(UpdateSongCommand {
                song_id: SongId::from_db(404),
                changes: SongChanges::default(),
            })
            .await;

        assert!(matches!(result, Err(SongError::NotFound(_))));
    }

    #[tokio::test]
    async fn blank_full_title_is_rejected() {
        let (handler, id) = seeded().await;

        let result = handler
            .handle(UpdateSongCommand {
                song_id: id,
                changes: SongChanges {
                    full_title: Some(" ".into()),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result, Err(SongError::Validation(_))));
    }
}
