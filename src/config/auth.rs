//! Session and access-control configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::foundation::RoleId;
use crate::domain::session::{SessionIssuer, DEFAULT_SESSION_TTL_HOURS, REMEMBER_ME_TTL_DAYS};

/// Session lifetimes, the admin role, and cookie flags
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of a normal session
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Lifetime of a remember-me session
    #[serde(default = "default_remember_me_ttl_days")]
    pub remember_me_ttl_days: i64,

    /// Role id allowed through admin routes
    #[serde(default = "default_admin_role_id")]
    pub admin_role_id: i32,

    /// Add `Secure` to the session cookie
    #[serde(default)]
    pub cookie_secure: bool,

    /// Interval of the expired-session sweep; 0 disables it
    #[serde(default)]
    pub session_sweep_interval_secs: u64,
}

impl AuthConfig {
    pub fn admin_role(&self) -> RoleId {
        RoleId::new(self.admin_role_id)
    }

    pub fn session_issuer(&self) -> SessionIssuer {
        SessionIssuer::new(
            chrono::Duration::hours(self.session_ttl_hours),
            chrono::Duration::days(self.remember_me_ttl_days),
        )
    }

    /// `None` when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.session_sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.session_sweep_interval_secs))
    }

    /// In production the session cookie must be `Secure`.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_ttl_hours <= 0 {
            return Err(ValidationError::InvalidSessionTtl("hour"));
        }
        if self.remember_me_ttl_days <= 0 {
            return Err(ValidationError::InvalidSessionTtl("day"));
        }
        if self.admin_role_id <= 0 {
            return Err(ValidationError::InvalidAdminRole);
        }
        if *environment == Environment::Production && !self.cookie_secure {
            return Err(ValidationError::CookieMustBeSecure);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            remember_me_ttl_days: default_remember_me_ttl_days(),
            admin_role_id: default_admin_role_id(),
            cookie_secure: false,
            session_sweep_interval_secs: 0,
        }
    }
}

fn default_session_ttl_hours() -> i64 {
    DEFAULT_SESSION_TTL_HOURS
}

fn default_remember_me_ttl_days() -> i64 {
    REMEMBER_ME_TTL_DAYS
}

fn default_admin_role_id() -> i32 {
    RoleId::ADMIN.value()
}
