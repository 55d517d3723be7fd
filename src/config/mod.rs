//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates. Variables use the
//! `TUNES` prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use tunes::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod reviews;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use reviews::ReviewsConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; in-memory storage when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub reviews: ReviewsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `TUNES__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TUNES__DATABASE__URL=...` -> `database.url = ...`
    /// - `TUNES__AUTH__SESSION_TTL_HOURS=12` -> `auth.session_ttl_hours = 12`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TUNES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
