//! Fixtures shared by the review handler tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::*;
use crate::adapters::memory::{InMemoryDatabase, InMemoryReviewRepository, InMemorySongRepository};
use crate::application::rating::RatingAggregator;
use crate::domain::foundation::{DomainError, ReviewId, SongId, UserId};
use crate::domain::song::{NewSong, RatingAggregate, ReviewTally, Song};
use crate::ports::{ReviewRepository, SongRepository};

/// Song repository that can be told to fail aggregate writes.
pub struct FlakySongRepository {
    inner: InMemorySongRepository,
    fail_writes: AtomicBool,
}

#[async_trait]
impl SongRepository for FlakySongRepository {
    async fn exists(&self, id: SongId) -> Result<bool, DomainError> {
        self.inner.exists(id).await
    }

    async fn count_reviews(&self, id: SongId) -> Result<ReviewTally, DomainError> {
        self.inner.count_reviews(id).await
    }

    async fn write_rating_aggregate(
        &self,
        id: SongId,
        aggregate: RatingAggregate,
    ) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("Simulated aggregate write failure"));
        }
        self.inner.write_rating_aggregate(id, aggregate).await
    }

    async fn create(&self, song: &NewSong) -> Result<Song, DomainError> {
        self.inner.create(song).await
    }

    async fn find_by_id(&self, id: SongId) -> Result<Option<Song>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, song: &Song) -> Result<(), DomainError> {
        self.inner.update(song).await
    }

    async fn delete(&self, id: SongId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}

pub struct Harness {
    pub db: InMemoryDatabase,
    pub songs: Arc<FlakySongRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
    pub aggregator: Arc<RatingAggregator>,
    pub song_id: SongId,
    pub user_id: UserId,
}

impl Harness {
    pub async fn new() -> Self {
        let db = InMemoryDatabase::new();
        let songs = Arc::new(FlakySongRepository {
            inner: InMemorySongRepository::new(db.clone()),
            fail_writes: AtomicBool::new(false),
        });
        let reviews = Arc::new(InMemoryReviewRepository::new(db.clone()));
        let aggregator = Arc::new(RatingAggregator::new(songs.clone()));
        let song = songs
            .create(&NewSong::new("Song".into(), "Song (full)".into(), String::new(), None).unwrap())
            .await
            .unwrap();

        Self {
            db,
            songs,
            reviews,
            aggregator,
            song_id: song.id(),
            user_id: UserId::from_db(1),
        }
    }

    pub fn fail_aggregate_writes(&self) {
        self.songs.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn aggregate(&self, likes: i64, dislikes: i64) -> RatingAggregate {
        RatingAggregate::from_tally(ReviewTally { likes, dislikes })
    }

    pub async fn stored_aggregate(&self) -> RatingAggregate {
        self.songs
            .find_by_id(self.song_id)
            .await
            .unwrap()
            .unwrap()
            .aggregate()
    }

    pub fn create_cmd(&self, is_like: bool) -> CreateReviewCommand {
        CreateReviewCommand {
            user_id: self.user_id,
            song_id: self.song_id,
            body: "Solid track".to_string(),
            is_like,
        }
    }

    pub fn create_handler(&self) -> CreateReviewHandler {
        self.create_handler_with(ReviewPolicy::default())
    }

    pub fn create_handler_with(&self, policy: ReviewPolicy) -> CreateReviewHandler {
        CreateReviewHandler::new(
            self.reviews.clone(),
            self.songs.clone(),
            self.aggregator.clone(),
            policy,
        )
    }

    pub fn update_handler_with(&self, policy: ReviewPolicy) -> UpdateReviewHandler {
        UpdateReviewHandler::new(self.reviews.clone(), self.aggregator.clone(), policy)
    }

    pub fn delete_handler_with(&self, policy: ReviewPolicy) -> DeleteReviewHandler {
        DeleteReviewHandler::new(self.reviews.clone(), self.aggregator.clone(), policy)
    }

    pub fn moderate_handler_with(&self, policy: ReviewPolicy) -> ModerateReviewHandler {
        ModerateReviewHandler::new(self.reviews.clone(), self.aggregator.clone(), policy)
    }

    /// Creates a review through the handler and returns its id.
    pub async fn seed_review(&self, is_like: bool) -> ReviewId {
        self.create_handler()
            .handle(self.create_cmd(is_like))
            .await
            .unwrap()
            .review
            .id()
    }

    pub async fn stored_review(&self, id: ReviewId) -> Option<crate::domain::review::Review> {
        self.reviews.find_by_id(id).await.unwrap()
    }
}
