//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `require_session` - Layer that resolves the `session_id` cookie and
//!   injects the live `Session` into extensions
//! - `require_admin` - Layer that additionally requires the admin role
//! - `CurrentSession` - Extractor that hands the session to a handler
//!
//! ```text
//! Request → require_session → injects Session into extensions
//!                 ↓
//!           require_admin (admin routes only)
//!                 ↓
//!           Handler → CurrentSession extractor reads from extensions
//! ```
//!
//! Layers run outermost-first, so on admin routes `require_admin` must be
//! added before `require_session` in `route_layer` order.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::cookie::session_token;
use crate::adapters::http::error::error_response;
use crate::application::handlers::auth::SessionAuthenticator;
use crate::domain::session::{AuthError, Session};

/// Auth middleware state - the session authenticator.
pub type AuthState = Arc<SessionAuthenticator>;

/// Rejects requests without a live session.
///
/// 401 when the cookie is missing, the token is unknown, or the session
/// has expired. Expired sessions are not removed from the store here.
pub async fn require_session(
    State(authenticator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());

    match authenticator.authenticate(token).await {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected unauthenticated request");
            AuthRejection(e).into_response()
        }
    }
}

/// Rejects sessions whose role is not the configured admin role.
///
/// Must run after `require_session`; without a session it answers 401.
pub async fn require_admin(
    State(authenticator): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    match authenticator.authorize_admin(request.extensions().get::<Session>()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected non-admin request");
            AuthRejection(e).into_response()
        }
    }
}

/// The authenticated session of the current request.
///
/// ```ignore
/// async fn my_handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     format!("Hello, {}!", session.user_email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AuthRejection(AuthError::MissingSession))
    }
}

/// Rejection type for auth gate failures.
#[derive(Debug, Clone)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        error_response(self.0.code(), self.0.to_string())
    }
}
