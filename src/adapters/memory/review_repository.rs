//! In-memory review repository and reader.

use async_trait::async_trait;

use super::database::{InMemoryDatabase, Tables};
use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, Timestamp, UserId};
use crate::domain::review::{NewReview, Review};
use crate::ports::{ReviewAuthor, ReviewReader, ReviewRepository, ReviewView, ReviewedSong};

#[derive(Debug, Clone)]
pub struct InMemoryReviewRepository {
    db: InMemoryDatabase,
}

impl InMemoryReviewRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

fn review_not_found(id: ReviewId) -> DomainError {
    DomainError::new(ErrorCode::ReviewNotFound, format!("Review {} not found", id))
}

/// Joins a review with its author and song. Reviews whose author is not in
/// the user table get an empty author summary, matching a left join.
fn to_view(tables: &Tables, review: &Review) -> Option<ReviewView> {
    let song = tables.songs.get(&review.song_id().value())?;
    let user = tables
        .users
        .get(&review.user_id().value())
        .map(|u| ReviewAuthor {
            id: u.id,
            email: u.email.clone(),
            username: u.username.clone(),
            avatar_url: u.avatar_url.clone(),
        })
        .unwrap_or_else(|| ReviewAuthor {
            id: review.user_id(),
            email: String::new(),
            username: String::new(),
            avatar_url: String::new(),
        });

    Some(ReviewView {
        id: review.id(),
        body: review.body().to_string(),
        is_like: review.is_like(),
        is_valid: review.is_valid(),
        user,
        song: ReviewedSong {
            id: song.id(),
            title: song.title().to_string(),
            full_title: song.full_title().to_string(),
            image_url: song.image_url().to_string(),
            release_date: song.release_date(),
        },
        created_at: *review.created_at(),
        updated_at: *review.updated_at(),
    })
}

fn newest_first(views: &mut [ReviewView]) {
    views.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, review: &NewReview) -> Result<Review, DomainError> {
        let mut tables = self.db.write().await;
        if !tables.songs.contains_key(&review.song_id().value()) {
            return Err(DomainError::new(
                ErrorCode::SongNotFound,
                format!("Song {} not found", review.song_id()),
            ));
        }
        let id = ReviewId::from_db(tables.next_review_id());
        let stored = Review::from_new(id, review.clone(), Timestamp::now());
        tables.reviews.insert(id.value(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.db.read().await.reviews.get(&id.value()).cloned())
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        let existing = tables
            .reviews
            .get_mut(&review.id().value())
            .ok_or_else(|| review_not_found(review.id()))?;
        *existing = review.clone();
        Ok(())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        tables
            .reviews
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| review_not_found(id))
    }

    async fn restore(&self, review: &Review) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        if !tables.songs.contains_key(&review.song_id().value()) {
            return Err(DomainError::new(
                ErrorCode::SongNotFound,
                format!("Song {} not found", review.song_id()),
            ));
        }
        tables.reviews.insert(review.id().value(), review.clone());
        Ok(())
    }
}

#[async_trait]
impl ReviewReader for InMemoryReviewRepository {
    async fn list(&self) -> Result<Vec<ReviewView>, DomainError> {
        let tables = self.db.read().await;
        let mut views: Vec<_> = tables
            .reviews
            .values()
            .filter_map(|r| to_view(&tables, r))
            .collect();
        newest_first(&mut views);
        Ok(views)
    }

    async fn get(&self, id: ReviewId) -> Result<Option<ReviewView>, DomainError> {
        let tables = self.db.read().await;
        Ok(tables
            .reviews
            .get(&id.value())
            .and_then(|r| to_view(&tables, r)))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ReviewView>, DomainError> {
        let tables = self.db.read().await;
        let mut views: Vec<_> = tables
            .reviews
            .values()
            .filter(|r| r.user_id() == user_id)
            .filter_map(|r| to_view(&tables, r))
            .collect();
        newest_first(&mut views);
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySongRepository, InMemoryUserRepository};
    use crate::domain::foundation::{RoleId, SongId};
    use crate::domain::song::NewSong;
    use crate::domain::user::NewUser;
    use crate::ports::{SongRepository, UserRepository};

    struct Fixture {
        reviews: InMemoryReviewRepository,
        song_id: SongId,
        user_id: UserId,
    }

    async fn fixture() -> Fixture {
        let db = InMemoryDatabase::new();
        let songs = InMemorySongRepository::new(db.clone());
        let users = InMemoryUserRepository::new(db.clone());
        let song = songs
            .create(&NewSong::new("Title".into(), "Full Title".into(), "img".into(), None).unwrap())
            .await
            .unwrap();
        let user = users
            .create(&NewUser {
                email: "critic@example.com".into(),
                username: "critic".into(),
                password_hash: "hash".into(),
                role_id: RoleId::USER,
            })
            .await
            .unwrap();
        Fixture {
            reviews: InMemoryReviewRepository::new(db),
            song_id: song.id(),
            user_id: user.id,
        }
    }

    fn review(f: &Fixture, body: &str) -> NewReview {
        NewReview::new(f.user_id, f.song_id, body.to_string(), true).unwrap()
    }

    #[tokio::test]
    async fn create_for_missing_song_is_rejected() {
        let f = fixture().await;
        let orphan = NewReview::new(f.user_id, SongId::from_db(99), "x".into(), true).unwrap();
        let err = f.reviews.create(&orphan).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SongNotFound);
    }

    #[tokio::test]
    async fn get_embeds_author_and_song() {
        let f = fixture().await;
        let created = f.reviews.create(&review(&f, "Loved it")).await.unwrap();

        let view = f.reviews.get(created.id()).await.unwrap().unwrap();

        assert_eq!(view.body, "Loved it");
        assert!(view.is_valid);
        assert_eq!(view.user.username, "critic");
        assert_eq!(view.song.full_title, "Full Title");
    }

    #[tokio::test]
    async fn delete_then_restore_keeps_original_id() {
        let f = fixture().await;
        let created = f.reviews.create(&review(&f, "Loved it")).await.unwrap();

        f.reviews.delete(created.id()).await.unwrap();
        assert!(f.reviews.find_by_id(created.id()).await.unwrap().is_none());

        f.reviews.restore(&created).await.unwrap();
        assert_eq!(
            f.reviews.find_by_id(created.id()).await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn delete_missing_review_is_not_found() {
        let f = fixture().await;
        let err = f.reviews.delete(ReviewId::from_db(5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReviewNotFound);
    }

    #[tokio::test]
    async fn list_by_user_filters_and_orders_newest_first() {
        let f = fixture().await;
        let first = f.reviews.create(&review(&f, "first")).await.unwrap();
        let second = f.reviews.create(&review(&f, "second")).await.unwrap();
        let other = NewReview::new(UserId::from_db(42), f.song_id, "other".into(), false).unwrap();
        f.reviews.create(&other).await.unwrap();

        let mine = f.reviews.list_by_user(f.user_id).await.unwrap();
        let ids: Vec<_> = mine.iter().map(|v| v.id).collect();

        assert_eq!(ids, vec![second.id(), first.id()]);
        assert_eq!(f.reviews.list().await.unwrap().len(), 3);
    }
}
