//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::row::{column, query_failed, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, RoleId, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::{TopReviewer, UserReader, UserRepository};

const USER_COLUMNS: &str = "id, email, username, password_hash, avatar_url, is_banned, role_id, created_at, updated_at";

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, username, password_hash, role_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role_id.value())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row_to_user(&row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Email already registered: {}", user.email),
                ))
            }
            Err(e) => Err(query_failed("insert user", e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("fetch user by email", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                username = $3,
                avatar_url = $4,
                password_hash = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.value())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.avatar_url)
        .bind(&user.password_hash)
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            )),
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Email already registered: {}", user.email),
                ))
            }
            Err(e) => Err(query_failed("update user", e)),
        }
    }
}

#[async_trait]
impl UserReader for PostgresUserRepository {
    async fn top_reviewers(&self, limit: u32) -> Result<Vec<TopReviewer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.username, u.avatar_url, COUNT(r.id) AS review_count
            FROM users u
            JOIN review r ON r.user_id = u.id AND r.is_valid = TRUE
            GROUP BY u.id
            ORDER BY review_count DESC, u.id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("rank reviewers", e))?;

        rows.iter()
            .map(|row| {
                Ok(TopReviewer {
                    id: UserId::from_db(column(row, "id")?),
                    username: column(row, "username")?,
                    avatar_url: column(row, "avatar_url")?,
                    review_count: column(row, "review_count")?,
                })
            })
            .collect()
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    Ok(User {
        id: UserId::from_db(column(row, "id")?),
        email: column(row, "email")?,
        username: column(row, "username")?,
        password_hash: column(row, "password_hash")?,
        avatar_url: column(row, "avatar_url")?,
        is_banned: column(row, "is_banned")?,
        role_id: RoleId::new(column(row, "role_id")?),
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}
