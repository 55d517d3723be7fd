//! HTTP routes for user rankings.

use axum::{routing::get, Router};

use super::handlers::{top_reviewers, UserHandlers};

/// Public routes, mounted at `/api/users`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/top-reviewers", get(top_reviewers))
        .with_state(handlers)
}
