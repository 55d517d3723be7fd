//! LoginHandler - verifies credentials and issues a session.

use std::sync::Arc;

use secrecy::Secret;

use crate::domain::session::{Session, SessionIdentity, SessionIssuer, SessionMetadata};
use crate::domain::user::{AccountError, UserProfile};
use crate::ports::{PasswordHasher, SessionStore, UserRepository};
use super::credentials::verify_password;

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: Secret<String>,
    pub remember_me: bool,
    pub metadata: SessionMetadata,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session: Session,
    pub profile: UserProfile,
}

/// Handler for logging in.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionStore>,
    issuer: SessionIssuer,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionStore>,
        issuer: SessionIssuer,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
            issuer,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let email = cmd.email.trim();

        // 1. Look up the account
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        // 2. Verify the password off the async runtime
        let verified = verify_password(&self.hasher, &cmd.password, &user.password_hash).await?;
        if !verified {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        if user.is_banned {
            tracing::warn!(user_id = %user.id, "Login attempt by banned user");
            return Err(AccountError::Banned);
        }

        // 3. Issue and store the session
        let session = self.issuer.issue(
            SessionIdentity {
                user_id: user.id,
                email: user.email.clone(),
                role_id: user.role_id,
            },
            cmd.metadata,
            cmd.remember_me,
        );
        self.sessions
            .save(session.clone())
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        tracing::info!(
            user_id = %user.id,
            remember_me = cmd.remember_me,
            expires_at = %session.expires_at.as_datetime(),
            "Session issued"
        );

        Ok(LoginResult {
            session,
            profile: user.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDatabase, InMemorySessionStore, InMemoryUserRepository};
    use crate::adapters::password::Argon2PasswordHasher;
    use crate::domain::foundation::{RoleId, Timestamp, UserId};
    use crate::domain::user::{NewUser, User};
    use chrono::Duration;

    struct Fixture {
        handler: LoginHandler,
        users: Arc<InMemoryUserRepository>,
        sessions: Arc<InMemorySessionStore>,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new(InMemoryDatabase::new()));
        let sessions = Arc::new(InMemorySessionStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        users
            .create(&NewUser {
                email: "fan@example.com".into(),
                username: "fan".into(),
                password_hash: hasher.hash("correct horse").unwrap(),
                role_id: RoleId::USER,
            })
            .await
            .unwrap();

        Fixture {
            handler: LoginHandler::new(
                users.clone(),
                hasher,
                sessions.clone(),
                SessionIssuer::default(),
            ),
            users,
            sessions,
        }
    }

    fn cmd(email: &str, password: &str, remember_me: bool) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: Secret::new(password.to_string()),
            remember_me,
            metadata: SessionMetadata::new("test-agent", "192.0.2.1"),
        }
    }

    fn within_one_second(actual: Duration, expected: Duration) -> bool {
        (actual - expected).num_milliseconds().abs() <= 1_000
    }

    #[tokio::test]
    async fn login_stores_one_day_session() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(cmd("fan@example.com", "correct horse", false))
            .await
            .unwrap();

        let lifetime = result.session.expires_at.duration_since(&Timestamp::now());
        assert!(within_one_second(lifetime, Duration::hours(24)));
        assert_eq!(result.session.metadata.ip, "192.0.2.1");
        assert!(f.sessions.get(&result.session.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn remember_me_issues_thirty_day_session() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(cmd("fan@example.com", "correct horse", true))
            .await
            .unwrap();

        let lifetime = result.session.expires_at.duration_since(&Timestamp::now());
        assert!(within_one_second(lifetime, Duration::days(30)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let f = fixture().await;

        let wrong = f.handler.handle(cmd("fan@example.com", "nope nope", false)).await;
        let unknown = f.handler.handle(cmd("who@example.com", "correct horse", false)).await;

        assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AccountError::InvalidCredentials)));
        assert_eq!(f.sessions.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn banned_user_cannot_log_in() {
        let f = fixture().await;
        let hasher = Argon2PasswordHasher::new();
        let mut banned = User::from_new(
            UserId::from_db(50),
            NewUser {
                email: "banned@example.com".into(),
                username: "banned".into(),
                password_hash: hasher.hash("correct horse").unwrap(),
                role_id: RoleId::USER,
            },
            Timestamp::now(),
        );
        banned.is_banned = true;
        f.users.insert(banned).await;

        let result = f
            .handler
            .handle(cmd("banned@example.com", "correct horse", false))
            .await;

        assert!(matches!(result, Err(AccountError::Banned)));
    }
}
