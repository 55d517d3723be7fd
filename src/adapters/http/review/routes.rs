//! HTTP routes for review endpoints.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::adapters::http::middleware::{require_admin, require_session, AuthState};

use super::handlers::{
    create_review, delete_review, get_review, list_reviews, list_user_reviews, moderate_review,
    update_review, ReviewHandlers,
};

/// Review routes, mounted at `/api/reviews`. Reads are public, writes need
/// a session.
pub fn review_routes(handlers: ReviewHandlers, auth: AuthState) -> Router {
    let public = Router::new()
        .route("/", get(list_reviews))
        .route("/:id", get(get_review))
        .route("/user/:id", get(list_user_reviews));

    let authenticated = Router::new()
        .route("/", post(create_review))
        .route("/:id", patch(update_review).delete(delete_review))
        .route_layer(middleware::from_fn_with_state(auth, require_session));

    public.merge(authenticated).with_state(handlers)
}

/// Admin review routes, mounted at `/api/admin/reviews`.
pub fn admin_review_routes(handlers: ReviewHandlers, auth: AuthState) -> Router {
    Router::new()
        .route("/:id/moderation", patch(moderate_review))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth, require_session))
        .with_state(handlers)
}
