//! Database configuration
//!
//! The whole section is optional. Without it the server keeps users, songs,
//! and reviews in memory.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Apply `migrations/` on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Pool options derived from this section.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
            .idle_timeout(Some(self.idle_timeout()))
    }

    /// Opens the connection pool.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        self.pool_options().connect(&self.url).await
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            run_migrations: false,
        }
    }

    #[test]
    fn accepts_postgres_urls() {
        assert!(config("postgres://tunes@localhost/tunes").validate().is_ok());
        assert!(config("postgresql://tunes:pw@db:5432/tunes").validate().is_ok());
    }

    #[test]
    fn rejects_missing_or_foreign_url() {
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
        assert_eq!(
            config("mysql://localhost/tunes").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn rejects_bad_pool_sizes() {
        let mut cfg = config("postgres://localhost/tunes");
        cfg.min_connections = 20;
        cfg.max_connections = 5;
        assert_eq!(cfg.validate(), Err(ValidationError::InvalidPoolSize));

        cfg.min_connections = 1;
        cfg.max_connections = 150;
        assert_eq!(cfg.validate(), Err(ValidationError::PoolSizeTooLarge));
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let cfg = config("postgres://localhost/tunes");
        assert_eq!(cfg.acquire_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.idle_timeout(), Duration::from_secs(600));
    }
}
