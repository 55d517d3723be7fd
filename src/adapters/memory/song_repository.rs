//! In-memory song repository and reader.

use async_trait::async_trait;

use super::database::InMemoryDatabase;
use crate::domain::foundation::{DomainError, ErrorCode, SongId, Timestamp};
use crate::domain::song::{NewSong, RatingAggregate, ReviewTally, Song, TimeRange};
use crate::ports::{SongReader, SongRepository};

#[derive(Debug, Clone)]
pub struct InMemorySongRepository {
    db: InMemoryDatabase,
}

impl InMemorySongRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

fn song_not_found(id: SongId) -> DomainError {
    DomainError::new(ErrorCode::SongNotFound, format!("Song {} not found", id))
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
    async fn exists(&self, id: SongId) -> Result<bool, DomainError> {
        Ok(self.db.read().await.songs.contains_key(&id.value()))
    }

    async fn count_reviews(&self, id: SongId) -> Result<ReviewTally, DomainError> {
        let tables = self.db.read().await;
        let tally = tables
            .reviews
            .values()
            .filter(|r| r.song_id() == id && r.is_valid())
            .fold(ReviewTally::default(), |mut tally, r| {
                if r.is_like() {
                    tally.likes += 1;
                } else {
                    tally.dislikes += 1;
                }
                tally
            });
        Ok(tally)
    }

    async fn write_rating_aggregate(
        &self,
        id: SongId,
        aggregate: RatingAggregate,
    ) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        let song = tables
            .songs
            .get_mut(&id.value())
            .ok_or_else(|| song_not_found(id))?;
        song.set_aggregate(aggregate, Timestamp::now());
        Ok(())
    }

    async fn create(&self, song: &NewSong) -> Result<Song, DomainError> {
        let mut tables = self.db.write().await;
        let id = SongId::from_db(tables.next_song_id());
        let stored = Song::from_new(id, song.clone(), Timestamp::now());
        tables.songs.insert(id.value(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: SongId) -> Result<Option<Song>, DomainError> {
        Ok(self.db.read().await.songs.get(&id.value()).cloned())
    }

    async fn update(&self, song: &Song) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        let existing = tables
            .songs
            .get_mut(&song.id().value())
            .ok_or_else(|| song_not_found(song.id()))?;
        // Aggregate columns belong to the recompute path.
        let aggregate = existing.aggregate();
        *existing = song.clone().with_aggregate(aggregate);
        Ok(())
    }

    async fn delete(&self, id: SongId) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        if tables.songs.remove(&id.value()).is_none() {
            return Err(song_not_found(id));
        }
        tables.reviews.retain(|_, r| r.song_id() != id);
        Ok(())
    }
}

#[async_trait]
impl SongReader for InMemorySongRepository {
    async fn list(&self) -> Result<Vec<Song>, DomainError> {
        Ok(self.db.read().await.songs.values().cloned().collect())
    }

    async fn sorted_by_rating(&self) -> Result<Vec<Song>, DomainError> {
        let mut songs = self.list().await?;
        songs.sort_by(|a, b| {
            b.aggregate()
                .rating
                .cmp(&a.aggregate().rating)
                .then_with(|| b.created_at().cmp(a.created_at()))
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(songs)
    }

    async fn top(&self, range: TimeRange, limit: u32) -> Result<Vec<Song>, DomainError> {
        let since = range.days().map(|days| Timestamp::now().minus_days(days));
        let tables = self.db.read().await;

        let mut ranked: Vec<Song> = tables
            .songs
            .values()
            .map(|song| {
                let tally = tables
                    .reviews
                    .values()
                    .filter(|r| r.song_id() == song.id() && r.is_valid())
                    .filter(|r| since.map_or(true, |since| !r.created_at().is_before(&since)))
                    .fold(ReviewTally::default(), |mut tally, r| {
                        if r.is_like() {
                            tally.likes += 1;
                        } else {
                            tally.dislikes += 1;
                        }
                        tally
                    });
                song.clone().with_aggregate(RatingAggregate::from_tally(tally))
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.aggregate()
                .rating
                .cmp(&a.aggregate().rating)
                .then_with(|| b.aggregate().like_count.cmp(&a.aggregate().like_count))
                .then_with(|| a.id().cmp(&b.id()))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }
}
