//! PostgreSQL implementation of ReviewRepository and ReviewReader.
//!
//! Writes here never touch the song counters; the application layer
//! recomputes them after each relevant change.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::row::{column, query_failed, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, SongId, UserId};
use crate::domain::review::{NewReview, Review};
use crate::ports::{ReviewAuthor, ReviewReader, ReviewRepository, ReviewView, ReviewedSong};

const REVIEW_COLUMNS: &str = "id, user_id, song_id, body, is_like, is_valid, created_at, updated_at";

const VIEW_SELECT: &str = r#"
    SELECT
        r.id, r.body, r.is_like, r.is_valid, r.created_at, r.updated_at,
        r.user_id, u.email AS user_email, u.username AS user_username,
        u.avatar_url AS user_avatar_url,
        s.id AS song_id, s.title AS song_title, s.full_title AS song_full_title,
        s.image_url AS song_image_url, s.release_date AS song_release_date
    FROM review r
    JOIN song s ON r.song_id = s.id
    LEFT JOIN users u ON r.user_id = u.id
"#;

/// PostgreSQL implementation of the review ports.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &NewReview) -> Result<Review, DomainError> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO review (user_id, song_id, body, is_like, is_valid, created_at, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW(), NOW())
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.user_id().value())
        .bind(review.song_id().value())
        .bind(review.body())
        .bind(review.is_like())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row_to_review(&row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(missing_parent(db_err.constraint(), review.user_id(), review.song_id()))
            }
            Err(e) => Err(query_failed("insert review", e)),
        }
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(&format!("SELECT {REVIEW_COLUMNS} FROM review WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch review", e))?;

        row.as_ref().map(row_to_review).transpose()
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE review SET
                body = $2,
                is_like = $3,
                is_valid = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(review.id().value())
        .bind(review.body())
        .bind(review.is_like())
        .bind(review.is_valid())
        .bind(review.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("update review", e))?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(review.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("delete review", e))?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        Ok(())
    }

    async fn restore(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO review (id, user_id, song_id, body, is_like, is_valid, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                body = EXCLUDED.body,
                is_like = EXCLUDED.is_like,
                is_valid = EXCLUDED.is_valid,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(review.id().value())
        .bind(review.user_id().value())
        .bind(review.song_id().value())
        .bind(review.body())
        .bind(review.is_like())
        .bind(review.is_valid())
        .bind(review.created_at().as_datetime())
        .bind(review.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(missing_parent(db_err.constraint(), review.user_id(), review.song_id()))
            }
            Err(e) => Err(query_failed("restore review", e)),
        }
    }
}

#[async_trait]
impl ReviewReader for PostgresReviewRepository {
    async fn list(&self) -> Result<Vec<ReviewView>, DomainError> {
        let rows = sqlx::query(&format!(
            "{VIEW_SELECT} ORDER BY r.created_at DESC, r.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list reviews", e))?;

        rows.iter().map(row_to_view).collect()
    }

    async fn get(&self, id: ReviewId) -> Result<Option<ReviewView>, DomainError> {
        let row = sqlx::query(&format!("{VIEW_SELECT} WHERE r.id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch review", e))?;

        row.as_ref().map(row_to_view).transpose()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ReviewView>, DomainError> {
        let rows = sqlx::query(&format!(
            "{VIEW_SELECT} WHERE r.user_id = $1 ORDER BY r.created_at DESC, r.id DESC"
        ))
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list reviews by user", e))?;

        rows.iter().map(row_to_view).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn review_not_found(id: ReviewId) -> DomainError {
    DomainError::new(ErrorCode::ReviewNotFound, format!("Review not found: {}", id))
}

fn missing_parent(constraint: Option<&str>, user_id: UserId, song_id: SongId) -> DomainError {
    match constraint {
        Some("review_user_id_fkey") => {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
        }
        _ => DomainError::new(ErrorCode::SongNotFound, format!("Song {} not found", song_id)),
    }
}

fn row_to_review(row: &PgRow) -> Result<Review, DomainError> {
    Ok(Review::reconstitute(
        ReviewId::from_db(column(row, "id")?),
        UserId::from_db(column(row, "user_id")?),
        SongId::from_db(column(row, "song_id")?),
        column(row, "body")?,
        column(row, "is_like")?,
        column(row, "is_valid")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

fn row_to_view(row: &PgRow) -> Result<ReviewView, DomainError> {
    let user_id = UserId::from_db(column(row, "user_id")?);
    let email: Option<String> = column(row, "user_email")?;
    let username: Option<String> = column(row, "user_username")?;
    let avatar_url: Option<String> = column(row, "user_avatar_url")?;

    Ok(ReviewView {
        id: ReviewId::from_db(column(row, "id")?),
        body: column(row, "body")?,
        is_like: column(row, "is_like")?,
        is_valid: column(row, "is_valid")?,
        user: ReviewAuthor {
            id: user_id,
            email: email.unwrap_or_default(),
            username: username.unwrap_or_default(),
            avatar_url: avatar_url.unwrap_or_default(),
        },
        song: ReviewedSong {
            id: SongId::from_db(column(row, "song_id")?),
            title: column(row, "song_title")?,
            full_title: column(row, "song_full_title")?,
            image_url: column(row, "song_image_url")?,
            release_date: column(row, "song_release_date")?,
        },
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}
