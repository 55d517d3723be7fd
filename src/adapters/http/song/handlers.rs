//! HTTP handlers for song endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, invalid_id};
use crate::adapters::http::extract::{JsonBody, QueryParams};
use crate::application::handlers::song::{
    CreateSongCommand, CreateSongHandler, DeleteSongHandler, GetSongHandler, ListSongsHandler,
    TopSongsHandler, TopSongsQuery, UpdateSongCommand, UpdateSongHandler,
};
use crate::domain::foundation::SongId;
use crate::domain::song::{Song, SongError};

use super::dto::{CreateSongRequest, SongResponse, TopSongsParams, UpdateSongRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SongHandlers {
    pub create_handler: Arc<CreateSongHandler>,
    pub update_handler: Arc<UpdateSongHandler>,
    pub delete_handler: Arc<DeleteSongHandler>,
    pub get_handler: Arc<GetSongHandler>,
    pub list_handler: Arc<ListSongsHandler>,
    pub top_handler: Arc<TopSongsHandler>,
}

fn song_list(songs: Vec<Song>) -> Response {
    let body: Vec<SongResponse> = songs.into_iter().map(Into::into).collect();
    (StatusCode::OK, Json(body)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Public queries
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/songs
pub async fn list_songs(State(handlers): State<SongHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(songs) => song_list(songs),
        Err(e) => handle_song_error(e),
    }
}

/// GET /api/songs/sorted-by-rating - Stored rating desc, newest first on ties
pub async fn sorted_by_rating(State(handlers): State<SongHandlers>) -> Response {
    match handlers.list_handler.sorted_by_rating().await {
        Ok(songs) => song_list(songs),
        Err(e) => handle_song_error(e),
    }
}

/// GET /api/songs/top?time_range=week|month|all&limit=N
pub async fn top_songs(
    State(handlers): State<SongHandlers>,
    QueryParams(params): QueryParams<TopSongsParams>,
) -> Response {
    let query = TopSongsQuery {
        range: params.time_range.unwrap_or_default(),
        limit: params.limit,
    };

    match handlers.top_handler.handle(query).await {
        Ok(songs) => song_list(songs),
        Err(e) => handle_song_error(e),
    }
}

/// GET /api/songs/:id
pub async fn get_song(
    State(handlers): State<SongHandlers>,
    Path(song_id): Path<String>,
) -> Response {
    let Ok(song_id) = song_id.parse::<SongId>() else {
        return invalid_id("song");
    };

    match handlers.get_handler.handle(song_id).await {
        Ok(song) => (StatusCode::OK, Json(SongResponse::from(song))).into_response(),
        Err(e) => handle_song_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin commands
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/songs
pub async fn create_song(
    State(handlers): State<SongHandlers>,
    JsonBody(req): JsonBody<CreateSongRequest>,
) -> Response {
    let cmd = CreateSongCommand {
        title: req.title,
        full_title: req.full_title,
        image_url: req.image_url,
        release_date: req.release_date,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(song) => (StatusCode::CREATED, Json(SongResponse::from(song))).into_response(),
        Err(e) => handle_song_error(e),
    }
}

/// PATCH /api/admin/songs/:id
pub async fn update_song(
    State(handlers): State<SongHandlers>,
    Path(song_id): Path<String>,
    JsonBody(req): JsonBody<UpdateSongRequest>,
) -> Response {
    let Ok(song_id) = song_id.parse::<SongId>() else {
        return invalid_id("song");
    };

    let cmd = UpdateSongCommand {
        song_id,
        changes: req.into(),
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(song) => (StatusCode::OK, Json(SongResponse::from(song))).into_response(),
        Err(e) => handle_song_error(e),
    }
}

/// DELETE /api/admin/songs/:id - Removes the song and its reviews
pub async fn delete_song(
    State(handlers): State<SongHandlers>,
    Path(song_id): Path<String>,
) -> Response {
    let Ok(song_id) = song_id.parse::<SongId>() else {
        return invalid_id("song");
    };

    match handlers.delete_handler.handle(song_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_song_error(e),
    }
}

fn handle_song_error(error: SongError) -> Response {
    error_response(error.code(), error.to_string())
}
