//! HTTP handlers for account endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::Secret;

use crate::adapters::http::client::session_metadata;
use crate::adapters::http::cookie::SessionCookie;
use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::middleware::CurrentSession;
use crate::application::handlers::auth::{
    ChangePasswordCommand, ChangePasswordHandler, GetProfileHandler, LoginCommand, LoginHandler,
    LogoutHandler, RegisterUserCommand, RegisterUserHandler, UpdateProfileHandler,
};
use crate::domain::session::AuthError;
use crate::domain::user::AccountError;

use super::dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterUserHandler>,
    login_handler: Arc<LoginHandler>,
    logout_handler: Arc<LogoutHandler>,
    profile_handler: Arc<GetProfileHandler>,
    update_profile_handler: Arc<UpdateProfileHandler>,
    change_password_handler: Arc<ChangePasswordHandler>,
    cookie: SessionCookie,
}

impl AuthHandlers {
    pub fn new(
        register_handler: Arc<RegisterUserHandler>,
        login_handler: Arc<LoginHandler>,
        logout_handler: Arc<LogoutHandler>,
        profile_handler: Arc<GetProfileHandler>,
        update_profile_handler: Arc<UpdateProfileHandler>,
        change_password_handler: Arc<ChangePasswordHandler>,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            register_handler,
            login_handler,
            logout_handler,
            profile_handler,
            update_profile_handler,
            change_password_handler,
            cookie,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Create an account
pub async fn register(
    State(handlers): State<AuthHandlers>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        email: req.email,
        username: req.username,
        password: Secret::new(req.password),
    };

    match handlers.register_handler.handle(cmd).await {
        Ok(profile) => (StatusCode::CREATED, Json(UserResponse::from(profile))).into_response(),
        Err(e) => handle_account_error(e),
    }
}

/// POST /api/auth/login - Start a session and set the cookie
pub async fn login(
    State(handlers): State<AuthHandlers>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Response {
    let cmd = LoginCommand {
        email: req.email,
        password: Secret::new(req.password),
        remember_me: req.remember_me,
        metadata: session_metadata(&headers, peer.map(|ConnectInfo(addr)| addr)),
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(result) => {
            let cookie = handlers.cookie.issue(&result.session);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(UserResponse::from(result.profile)),
            )
                .into_response()
        }
        Err(e) => handle_account_error(e),
    }
}

/// GET /api/profile - Current user's account
pub async fn profile(
    State(handlers): State<AuthHandlers>,
    CurrentSession(session): CurrentSession,
) -> Response {
    match handlers.profile_handler.handle(session.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(UserResponse::from(profile))).into_response(),
        Err(e) => handle_account_error(e),
    }
}

/// PATCH /api/profile - Edit email, username or avatar URL
pub async fn update_profile(
    State(handlers): State<AuthHandlers>,
    CurrentSession(session): CurrentSession,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Response {
    match handlers
        .update_profile_handler
        .handle(session.user_id, req.into())
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(UserResponse::from(profile))).into_response(),
        Err(e) => handle_account_error(e),
    }
}

/// PATCH /api/profile/password - Replace the password
pub async fn change_password(
    State(handlers): State<AuthHandlers>,
    CurrentSession(session): CurrentSession,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> Response {
    let cmd = ChangePasswordCommand {
        user_id: session.user_id,
        old_password: Secret::new(req.old_password),
        new_password: Secret::new(req.new_password),
    };

    match handlers.change_password_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_account_error(e),
    }
}

/// POST /api/profile/logout - End the current session and clear the cookie
pub async fn logout(
    State(handlers): State<AuthHandlers>,
    CurrentSession(session): CurrentSession,
) -> Response {
    match handlers.logout_handler.handle(&session.token).await {
        Ok(()) => (
            StatusCode::OK,
            [(header::SET_COOKIE, handlers.cookie.clear())],
            Json(MessageResponse {
                message: "successfully logged out".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_auth_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_account_error(error: AccountError) -> Response {
    error_response(error.code(), error.to_string())
}

fn handle_auth_error(error: AuthError) -> Response {
    error_response(error.code(), error.to_string())
}
