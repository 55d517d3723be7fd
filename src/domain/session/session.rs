//! Server-side login session.
//!
//! A `Session` is the credential minted by a successful login. It is held
//! only by the session store and is never written to durable storage.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RoleId, SessionToken, Timestamp, UserId};

/// Identity the session is bound to, taken from the user record at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub email: String,
    pub role_id: RoleId,
}

/// Request metadata captured when the session was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub user_agent: String,
    pub ip: String,
}

impl SessionMetadata {
    pub fn new(user_agent: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ip: ip.into(),
        }
    }
}

/// Authenticated session resolved from the `session_id` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub user_email: String,
    pub role_id: RoleId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub metadata: SessionMetadata,
}

impl Session {
    /// True once `expires_at` lies strictly before `now`.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at.is_before(now)
    }

    /// True when the session's role matches the given admin role.
    pub fn has_role(&self, role: RoleId) -> bool {
        self.role_id == role
    }

    /// Seconds the cookie should live for, measured from `now`.
    pub fn max_age_secs(&self, now: &Timestamp) -> i64 {
        self.expires_at.seconds_until(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_expiring_at(expires_at: Timestamp) -> Session {
        Session {
            token: SessionToken::generate(),
            user_id: UserId::new(1).unwrap(),
            user_email: "listener@example.com".to_string(),
            role_id: RoleId::USER,
            created_at: expires_at.minus_days(1),
            expires_at,
            metadata: SessionMetadata::default(),
        }
    }

    #[test]
    fn session_in_the_past_is_expired() {
        let now = Timestamp::now();
        let session = session_expiring_at(now.minus_days(1));
        assert!(session.is_expired_at(&now));
        assert_eq!(session.max_age_secs(&now), 0);
    }

    #[test]
    fn session_in_the_future_is_live() {
        let now = Timestamp::now();
        let session = session_expiring_at(now.add_days(1));
        assert!(!session.is_expired_at(&now));
        assert_eq!(session.max_age_secs(&now), 86_400);
    }

    #[test]
    fn has_role_compares_role_ids() {
        let session = session_expiring_at(Timestamp::now().add_days(1));
        assert!(session.has_role(RoleId::USER));
        assert!(!session.has_role(RoleId::ADMIN));
    }
}
