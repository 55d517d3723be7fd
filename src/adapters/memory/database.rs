//! Shared in-memory tables.
//!
//! The song, review, and user adapters all read and write the same
//! `InMemoryDatabase`, so joins (review author, reviewed song) and cascades
//! (deleting a song removes its reviews) behave as they do in Postgres.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::review::Review;
use crate::domain::song::Song;
use crate::domain::user::User;

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub users: BTreeMap<i64, User>,
    pub songs: BTreeMap<i64, Song>,
    pub reviews: BTreeMap<i64, Review>,
    last_user_id: i64,
    last_song_id: i64,
    last_review_id: i64,
}

impl Tables {
    pub fn next_user_id(&mut self) -> i64 {
        self.last_user_id += 1;
        self.last_user_id
    }

    pub fn next_song_id(&mut self) -> i64 {
        self.last_song_id += 1;
        self.last_song_id
    }

    pub fn next_review_id(&mut self) -> i64 {
        self.last_review_id += 1;
        self.last_review_id
    }
}

/// Cloneable handle to one set of in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(super) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    /// Number of stored reviews (useful for tests).
    pub async fn review_count(&self) -> usize {
        self.tables.read().await.reviews.len()
    }

    /// Number of stored songs (useful for tests).
    pub async fn song_count(&self) -> usize {
        self.tables.read().await.songs.len()
    }
}
