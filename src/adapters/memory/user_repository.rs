//! In-memory user repository.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::database::InMemoryDatabase;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::{TopReviewer, UserReader, UserRepository};

#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    db: InMemoryDatabase,
}

impl InMemoryUserRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }

    /// Stores a fully-formed user, bypassing registration. Used to seed
    /// admin accounts and banned users in tests.
    pub async fn insert(&self, user: User) {
        self.db.write().await.users.insert(user.id.value(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut tables = self.db.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Email already registered",
            ));
        }

        let id = UserId::from_db(tables.next_user_id());
        let stored = User::from_new(id, user.clone(), Timestamp::now());
        tables.users.insert(id.value(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.db.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.db.read().await.users.get(&id.value()).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.db.write().await;
        if !tables.users.contains_key(&user.id.value()) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }
        let taken = tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Email already registered",
            ));
        }

        tables.users.insert(user.id.value(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl UserReader for InMemoryUserRepository {
    async fn top_reviewers(&self, limit: u32) -> Result<Vec<TopReviewer>, DomainError> {
        let tables = self.db.read().await;

        let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
        for review in tables.reviews.values().filter(|r| r.is_valid()) {
            *counts.entry(review.user_id().value()).or_default() += 1;
        }

        let mut ranked: Vec<TopReviewer> = counts
            .into_iter()
            .filter_map(|(user_id, review_count)| {
                tables.users.get(&user_id).map(|user| TopReviewer {
                    id: user.id,
                    username: user.username.clone(),
                    avatar_url: user.avatar_url.clone(),
                    review_count,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.review_count.cmp(&a.review_count).then(a.id.cmp(&b.id)));
        ranked.truncate(limit as usize);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RoleId;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: "listener".to_string(),
            password_hash: "hash".to_string(),
            role_id: RoleId::USER,
        }
    }

    #[tokio::test]
    async fn create_then_find_by_email_and_id() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        let created = repo.create(&new_user("a@example.com")).await.unwrap();

        let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_id.email, "a@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        repo.create(&new_user("a@example.com")).await.unwrap();

        let err = repo.create(&new_user("A@example.com")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn unknown_email_is_none() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_account() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        repo.create(&new_user("a@example.com")).await.unwrap();
        let mut second = repo.create(&new_user("b@example.com")).await.unwrap();

        second.email = "A@example.com".into();
        let err = repo.update(&second).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_keeps_own_email_and_persists_changes() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        let mut user = repo.create(&new_user("a@example.com")).await.unwrap();

        user.username = "renamed".into();
        repo.update(&user).await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "renamed");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        let ghost = User::from_new(UserId::from_db(9), new_user("g@example.com"), Timestamp::now());

        let err = repo.update(&ghost).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn top_reviewers_counts_only_valid_reviews() {
        use crate::adapters::memory::{InMemoryReviewRepository, InMemorySongRepository};
        use crate::domain::review::NewReview;
        use crate::domain::song::NewSong;
        use crate::ports::{ReviewRepository, SongRepository};

        let db = InMemoryDatabase::new();
        let users = InMemoryUserRepository::new(db.clone());
        let songs = InMemorySongRepository::new(db.clone());
        let reviews = InMemoryReviewRepository::new(db);
        let song = songs
            .create(&NewSong::new("Song".into(), "Song".into(), "img".into(), None).unwrap())
            .await
            .unwrap();
        let quiet = users.create(&new_user("quiet@example.com")).await.unwrap();
        let busy = users.create(&new_user("busy@example.com")).await.unwrap();
        users.create(&new_user("silent@example.com")).await.unwrap();

        let write = |user_id| NewReview::new(user_id, song.id(), "ok".into(), true).unwrap();
        reviews.create(&write(quiet.id)).await.unwrap();
        reviews.create(&write(busy.id)).await.unwrap();
        reviews.create(&write(busy.id)).await.unwrap();
        let mut hidden = reviews.create(&write(busy.id)).await.unwrap();
        hidden.set_validity(false, Timestamp::now());
        reviews.update(&hidden).await.unwrap();

        let ranked = users.top_reviewers(10).await.unwrap();

        let summary: Vec<(UserId, i64)> = ranked.iter().map(|r| (r.id, r.review_count)).collect();
        assert_eq!(summary, vec![(busy.id, 2), (quiet.id, 1)]);
        assert_eq!(users.top_reviewers(1).await.unwrap().len(), 1);
    }
}
