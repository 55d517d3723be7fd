//! Column decoding shared by the PostgreSQL adapters.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Reads one column, mapping decode failures to `DatabaseError`.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(super) fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: DateTime<Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

pub(super) fn query_failed(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, e),
    )
}
