//! RatingAggregator - keeps a song's like/dislike/rating counters in step
//! with its valid reviews.
//!
//! Every recompute re-derives the counters from the review rows and writes
//! all three back at once. Counters are never adjusted incrementally.
//!
//! Two recomputes for the same song can interleave their count and write
//! steps so that an older count lands last. With serialization enabled a
//! per-song async mutex makes them run one after another; recomputes for
//! different songs still run in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{ErrorCode, SongId};
use crate::domain::song::{RatingAggregate, SongError};
use crate::ports::SongRepository;

/// Per-song async locks, created on demand and dropped once unused.
#[derive(Default)]
struct SongLocks {
    locks: Mutex<HashMap<SongId, Arc<Mutex<()>>>>,
}

impl SongLocks {
    async fn acquire(&self, song_id: SongId) -> (Arc<Mutex<()>>, OwnedMutexGuard<()>) {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(song_id).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;
        (lock, guard)
    }

    async fn release(&self, song_id: SongId, lock: Arc<Mutex<()>>, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut locks = self.locks.lock().await;
        // One reference is held by the map, one by `lock`. Anything more is a waiter.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&song_id);
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

/// Recomputes song rating aggregates from review rows.
pub struct RatingAggregator {
    songs: Arc<dyn SongRepository>,
    locks: Option<SongLocks>,
}

impl RatingAggregator {
    /// Creates an aggregator that serializes recomputes per song.
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self::with_serialization(songs, true)
    }

    pub fn with_serialization(songs: Arc<dyn SongRepository>, serialize: bool) -> Self {
        Self {
            songs,
            locks: serialize.then(SongLocks::default),
        }
    }

    /// Re-derives the aggregate for one song and persists it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the song does not exist
    /// - `Infrastructure` if counting or writing fails
    pub async fn recompute(&self, song_id: SongId) -> Result<RatingAggregate, SongError> {
        match &self.locks {
            Some(locks) => {
                let (lock, guard) = locks.acquire(song_id).await;
                let result = self.recompute_unlocked(song_id).await;
                locks.release(song_id, lock, guard).await;
                result
            }
            None => self.recompute_unlocked(song_id).await,
        }
    }

    async fn recompute_unlocked(&self, song_id: SongId) -> Result<RatingAggregate, SongError> {
        if !self.songs.exists(song_id).await? {
            return Err(SongError::NotFound(song_id));
        }

        let tally = self.songs.count_reviews(song_id).await?;
        let aggregate = RatingAggregate::from_tally(tally);

        self.songs
            .write_rating_aggregate(song_id, aggregate)
            .await
            .map_err(|e| match e.code {
                ErrorCode::SongNotFound => SongError::NotFound(song_id),
                _ => SongError::Infrastructure(e.to_string()),
            })?;

        tracing::debug!(
            song_id = %song_id,
            likes = aggregate.like_count,
            dislikes = aggregate.dislike_count,
            rating = aggregate.rating,
            "Recomputed song rating"
        );

        Ok(aggregate)
    }
}
