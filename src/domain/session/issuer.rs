//! Session issuance.
//!
//! Turns an authenticated identity plus request metadata into a fresh
//! `Session`. Issuing has no side effects; the caller saves the result.

use chrono::Duration;

use super::session::{Session, SessionIdentity, SessionMetadata};
use crate::domain::foundation::{SessionToken, Timestamp};

/// Lifetime of a session when "remember me" is not requested.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Lifetime of a "remember me" session.
pub const REMEMBER_ME_TTL_DAYS: i64 = 30;

/// Builds sessions with expiry chosen by the remember-me flag.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    ttl: Duration,
    remember_me_ttl: Duration,
}

impl SessionIssuer {
    pub fn new(ttl: Duration, remember_me_ttl: Duration) -> Self {
        Self {
            ttl,
            remember_me_ttl,
        }
    }

    /// Issues a session starting now.
    pub fn issue(
        &self,
        identity: SessionIdentity,
        metadata: SessionMetadata,
        remember_me: bool,
    ) -> Session {
        self.issue_at(identity, metadata, remember_me, Timestamp::now())
    }

    /// Issues a session starting at `now`.
    pub fn issue_at(
        &self,
        identity: SessionIdentity,
        metadata: SessionMetadata,
        remember_me: bool,
        now: Timestamp,
    ) -> Session {
        let ttl = if remember_me {
            self.remember_me_ttl
        } else {
            self.ttl
        };

        Session {
            token: SessionToken::generate(),
            user_id: identity.user_id,
            user_email: identity.email,
            role_id: identity.role_id,
            created_at: now,
            expires_at: now.plus(ttl),
            metadata,
        }
    }
}

impl Default for SessionIssuer {
    fn default() -> Self {
        Self::new(
            Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            Duration::days(REMEMBER_ME_TTL_DAYS),
        )
    }
}
