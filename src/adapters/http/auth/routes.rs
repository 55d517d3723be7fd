//! HTTP routes for account endpoints.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::adapters::http::middleware::{require_session, AuthState};

use super::handlers::{
    change_password, login, logout, profile, register, update_profile, AuthHandlers,
};

/// Public routes, mounted at `/api/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(handlers)
}

/// Session-protected routes, mounted at `/api/profile`.
pub fn profile_routes(handlers: AuthHandlers, auth: AuthState) -> Router {
    Router::new()
        .route("/", get(profile).patch(update_profile))
        .route("/password", patch(change_password))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(auth, require_session))
        .with_state(handlers)
}
