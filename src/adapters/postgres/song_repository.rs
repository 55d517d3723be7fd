//! PostgreSQL implementation of SongRepository and SongReader.
//!
//! The `like_count`, `dislike_count` and `rating` columns are only written
//! by `write_rating_aggregate`. Catalog updates leave them alone.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::row::{column, query_failed, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, SongId};
use crate::domain::song::{NewSong, RatingAggregate, ReviewTally, Song, TimeRange};
use crate::ports::{SongReader, SongRepository};

const SONG_COLUMNS: &str = "s.id, s.title, s.full_title, s.image_url, s.release_date, \
     s.like_count, s.dislike_count, s.rating, s.created_at, s.updated_at";

/// PostgreSQL implementation of the song ports.
#[derive(Clone)]
pub struct PostgresSongRepository {
    pool: PgPool,
}

impl PostgresSongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongRepository for PostgresSongRepository {
    async fn exists(&self, id: SongId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM song WHERE id = $1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("check song existence", e))?;

        Ok(result.0 > 0)
    }

    async fn count_reviews(&self, id: SongId) -> Result<ReviewTally, DomainError> {
        let (likes, dislikes): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN is_like THEN 1 ELSE 0 END), 0)::BIGINT AS likes,
                COALESCE(SUM(CASE WHEN NOT is_like THEN 1 ELSE 0 END), 0)::BIGINT AS dislikes
            FROM review
            WHERE song_id = $1 AND is_valid = TRUE
            "#,
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("count reviews", e))?;

        Ok(ReviewTally { likes, dislikes })
    }

    async fn write_rating_aggregate(
        &self,
        id: SongId,
        aggregate: RatingAggregate,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE song SET
                like_count = $2,
                dislike_count = $3,
                rating = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(aggregate.like_count)
        .bind(aggregate.dislike_count)
        .bind(aggregate.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("write rating aggregate", e))?;

        if result.rows_affected() == 0 {
            return Err(song_not_found(id));
        }

        Ok(())
    }

    async fn create(&self, song: &NewSong) -> Result<Song, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO song AS s (title, full_title, image_url, release_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {SONG_COLUMNS}
            "#
        ))
        .bind(song.title())
        .bind(song.full_title())
        .bind(song.image_url())
        .bind(song.release_date())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("insert song", e))?;

        row_to_song(&row)
    }

    async fn find_by_id(&self, id: SongId) -> Result<Option<Song>, DomainError> {
        let row = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM song s WHERE s.id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch song", e))?;

        row.as_ref().map(row_to_song).transpose()
    }

    async fn update(&self, song: &Song) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE song SET
                title = $2,
                full_title = $3,
                image_url = $4,
                release_date = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(song.id().value())
        .bind(song.title())
        .bind(song.full_title())
        .bind(song.image_url())
        .bind(song.release_date())
        .bind(song.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("update song", e))?;

        if result.rows_affected() == 0 {
            return Err(song_not_found(song.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: SongId) -> Result<(), DomainError> {
        // Reviews go with the song through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM song WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("delete song", e))?;

        if result.rows_affected() == 0 {
            return Err(song_not_found(id));
        }

        Ok(())
    }
}

#[async_trait]
impl SongReader for PostgresSongRepository {
    async fn list(&self) -> Result<Vec<Song>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM song s ORDER BY s.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("list songs", e))?;

        rows.iter().map(row_to_song).collect()
    }

    async fn sorted_by_rating(&self) -> Result<Vec<Song>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SONG_COLUMNS} FROM song s ORDER BY s.rating DESC, s.created_at DESC, s.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list songs by rating", e))?;

        rows.iter().map(row_to_song).collect()
    }

    async fn top(&self, range: TimeRange, limit: u32) -> Result<Vec<Song>, DomainError> {
        let days = range.days().map(|d| d as i32);
        let rows = sqlx::query(
            r#"
            SELECT ranked.* FROM (
                SELECT
                    s.id, s.title, s.full_title, s.image_url, s.release_date,
                    s.created_at, s.updated_at,
                    COUNT(r.id) FILTER (WHERE r.is_like) AS like_count,
                    COUNT(r.id) FILTER (WHERE NOT r.is_like) AS dislike_count,
                    COUNT(r.id) FILTER (WHERE r.is_like)
                        - COUNT(r.id) FILTER (WHERE NOT r.is_like) AS rating
                FROM song s
                LEFT JOIN review r
                    ON r.song_id = s.id
                    AND r.is_valid = TRUE
                    AND ($2::INT IS NULL OR r.created_at >= NOW() - make_interval(days => $2::INT))
                GROUP BY s.id
            ) ranked
            ORDER BY ranked.rating DESC, ranked.like_count DESC, ranked.id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .bind(days)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("rank top songs", e))?;

        rows.iter().map(row_to_song).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn song_not_found(id: SongId) -> DomainError {
    DomainError::new(ErrorCode::SongNotFound, format!("Song not found: {}", id))
}

fn row_to_song(row: &PgRow) -> Result<Song, DomainError> {
    let release_date: Option<NaiveDate> = column(row, "release_date")?;
    let aggregate = RatingAggregate {
        like_count: column(row, "like_count")?,
        dislike_count: column(row, "dislike_count")?,
        rating: column(row, "rating")?,
    };

    Ok(Song::reconstitute(
        SongId::from_db(column(row, "id")?),
        column(row, "title")?,
        column(row, "full_title")?,
        column(row, "image_url")?,
        release_date,
        aggregate,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
