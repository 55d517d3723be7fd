//! In-memory session store.
//!
//! Process-local map from token to session. Every operation holds the lock
//! for a single map call; nothing awaits while the lock is held.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionToken, Timestamp};
use crate::domain::session::Session;
use crate::ports::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: Session) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), DomainError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn purge_expired(&self, now: &Timestamp) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RoleId, UserId};
    use crate::domain::session::{SessionIdentity, SessionIssuer, SessionMetadata};
    use chrono::Duration;

    fn issue(issuer: &SessionIssuer, now: Timestamp) -> Session {
        issuer.issue_at(
            SessionIdentity {
                user_id: UserId::from_db(1),
                email: "a@b.c".to_string(),
                role_id: RoleId::USER,
            },
            SessionMetadata::new("test-agent", "127.0.0.1"),
            false,
            now,
        )
    }

    #[tokio::test]
    async fn save_then_get_returns_session() {
        let store = InMemorySessionStore::new();
        let session = issue(&SessionIssuer::default(), Timestamp::now());

        store.save(session.clone()).await.unwrap();

        assert_eq!(store.get(&session.token).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn get_unknown_token_is_none() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::from_client("not-a-session");
        assert!(store.get(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_still_returned_by_get() {
        let store = InMemorySessionStore::new();
        let issuer = SessionIssuer::new(Duration::hours(1), Duration::days(1));
        let session = issue(&issuer, Timestamp::now().minus_days(1));

        store.save(session.clone()).await.unwrap();

        let found = store.get(&session.token).await.unwrap().unwrap();
        assert!(found.is_expired_at(&Timestamp::now()));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemorySessionStore::new();
        let session = issue(&SessionIssuer::default(), Timestamp::now());
        store.save(session.clone()).await.unwrap();

        store.delete(&session.token).await.unwrap();
        store.delete(&session.token).await.unwrap();

        assert!(store.get(&session.token).await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_overwrites_same_token() {
        let store = InMemorySessionStore::new();
        let mut session = issue(&SessionIssuer::default(), Timestamp::now());
        store.save(session.clone()).await.unwrap();

        session.user_email = "changed@b.c".to_string();
        store.save(session.clone()).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        let found = store.get(&session.token).await.unwrap().unwrap();
        assert_eq!(found.user_email, "changed@b.c");
    }

    #[tokio::test]
    async fn purge_expired_removes_only_expired() {
        let store = InMemorySessionStore::new();
        let issuer = SessionIssuer::new(Duration::hours(1), Duration::days(1));
        let stale = issue(&issuer, Timestamp::now().minus_days(1));
        let live = issue(&issuer, Timestamp::now());
        store.save(stale.clone()).await.unwrap();
        store.save(live.clone()).await.unwrap();

        let removed = store.purge_expired(&Timestamp::now()).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get(&stale.token).await.unwrap().is_none());
        assert!(store.get(&live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_saves_are_all_kept() {
        let store = InMemorySessionStore::new();
        let issuer = SessionIssuer::default();

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                let session = issue(&issuer, Timestamp::now());
                tokio::spawn(async move { store.save(session).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.len().await.unwrap(), 32);
    }
}
