//! Shared harness for HTTP integration tests.
//!
//! Drives the full router in process with `tower::ServiceExt::oneshot`,
//! on in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tunes::adapters::http::{api_router, Adapters, AppState};
use tunes::adapters::memory::InMemoryDatabase;
use tunes::config::AppConfig;
use tunes::domain::foundation::{RoleId, Timestamp, UserId};
use tunes::domain::session::{Session, SessionIdentity, SessionIssuer, SessionMetadata};
use tunes::ports::SessionStore;

pub struct TestApp {
    pub router: Router,
    pub db: InMemoryDatabase,
    pub sessions: Arc<dyn SessionStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let db = InMemoryDatabase::new();
        let adapters = Adapters::in_memory(db.clone());
        let sessions = adapters.sessions.clone();
        let router = api_router(AppState::new(adapters, &config));
        Self {
            router,
            db,
            sessions,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        self.send(method, uri, token, body.map(|body| body.to_string()))
            .await
    }

    /// Sends `body` verbatim as `application/json`, even if it does not parse.
    pub async fn post_raw(&self, uri: &str, token: Option<&str>, body: &str) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body.to_string()))
            .await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("session_id={}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Stores a live session directly, bypassing login.
    pub async fn session_for(&self, user_id: i64, role_id: RoleId) -> Session {
        let session = SessionIssuer::default().issue(
            SessionIdentity {
                user_id: UserId::from_db(user_id),
                email: format!("user{}@example.com", user_id),
                role_id,
            },
            SessionMetadata::default(),
            false,
        );
        self.sessions.save(session.clone()).await.unwrap();
        session
    }

    pub async fn admin_token(&self) -> String {
        self.session_for(999, RoleId::ADMIN)
            .await
            .token
            .as_str()
            .to_string()
    }

    /// Stores a session that expired an hour ago.
    pub async fn expired_session(&self) -> Session {
        let now = Timestamp::now();
        let session = SessionIssuer::default().issue_at(
            SessionIdentity {
                user_id: UserId::from_db(1),
                email: "late@example.com".into(),
                role_id: RoleId::USER,
            },
            SessionMetadata::default(),
            false,
            now.plus(chrono::Duration::hours(-25)),
        );
        self.sessions.save(session.clone()).await.unwrap();
        session
    }

    /// Registers and logs in; returns the session token from the cookie.
    pub async fn register_and_login(&self, email: &str) -> String {
        let registered = self
            .post(
                "/api/auth/register",
                None,
                json!({"email": email, "username": "listener", "password": "correct-horse"}),
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        let login = self
            .post(
                "/api/auth/login",
                None,
                json!({"email": email, "password": "correct-horse"}),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);
        cookie_token(login.set_cookie.as_deref().unwrap())
    }

    pub async fn create_song(&self, admin: &str, title: &str) -> i64 {
        let response = self
            .post(
                "/api/admin/songs",
                Some(admin),
                json!({"title": title, "full_title": format!("{} (Album Version)", title)}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().unwrap()
    }

    /// `(like_count, dislike_count, rating)` as served by `GET /api/songs/:id`.
    pub async fn song_counters(&self, song_id: i64) -> (i64, i64, i64) {
        let song = self.get(&format!("/api/songs/{}", song_id), None).await;
        assert_eq!(song.status, StatusCode::OK);
        counters(&song.body)
    }
}

pub fn counters(value: &Value) -> (i64, i64, i64) {
    (
        value["like_count"].as_i64().unwrap(),
        value["dislike_count"].as_i64().unwrap(),
        value["rating"].as_i64().unwrap(),
    )
}

pub fn cookie_token(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session_id="))
        .unwrap()
        .to_string()
}
