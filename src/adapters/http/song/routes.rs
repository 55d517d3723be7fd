//! HTTP routes for song endpoints.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::adapters::http::middleware::{require_admin, require_session, AuthState};

use super::handlers::{
    create_song, delete_song, get_song, list_songs, sorted_by_rating, top_songs, update_song,
    SongHandlers,
};

/// Public catalog routes, mounted at `/api/songs`.
pub fn song_routes(handlers: SongHandlers) -> Router {
    Router::new()
        .route("/", get(list_songs))
        .route("/sorted-by-rating", get(sorted_by_rating))
        .route("/top", get(top_songs))
        .route("/:id", get(get_song))
        .with_state(handlers)
}

/// Admin catalog routes, mounted at `/api/admin/songs`.
pub fn admin_song_routes(handlers: SongHandlers, auth: AuthState) -> Router {
    Router::new()
        .route("/", post(create_song))
        .route("/:id", patch(update_song).delete(delete_song))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth, require_session))
        .with_state(handlers)
}
