//! HTTP handlers for review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, invalid_id};
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::middleware::CurrentSession;
use crate::application::handlers::review::{
    CreateReviewCommand, CreateReviewHandler, DeleteReviewCommand, DeleteReviewHandler,
    GetReviewHandler, ListReviewsHandler, ListUserReviewsHandler, ModerateReviewCommand,
    ModerateReviewHandler, UpdateReviewCommand, UpdateReviewHandler,
};
use crate::domain::foundation::{ReviewId, SongId, UserId};
use crate::domain::review::{ReviewChanges, ReviewError};

use super::dto::{
    CreateReviewRequest, ModerateReviewRequest, ReviewDetailResponse, ReviewResponse,
    UpdateReviewRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewHandlers {
    pub create_handler: Arc<CreateReviewHandler>,
    pub update_handler: Arc<UpdateReviewHandler>,
    pub delete_handler: Arc<DeleteReviewHandler>,
    pub moderate_handler: Arc<ModerateReviewHandler>,
    pub get_handler: Arc<GetReviewHandler>,
    pub list_handler: Arc<ListReviewsHandler>,
    pub list_by_user_handler: Arc<ListUserReviewsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// Public queries
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/reviews - All reviews, newest first
pub async fn list_reviews(State(handlers): State<ReviewHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(views) => {
            let body: Vec<ReviewDetailResponse> = views.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// GET /api/reviews/:id
pub async fn get_review(
    State(handlers): State<ReviewHandlers>,
    Path(review_id): Path<String>,
) -> Response {
    let Ok(review_id) = review_id.parse::<ReviewId>() else {
        return invalid_id("review");
    };

    match handlers.get_handler.handle(review_id).await {
        Ok(view) => (StatusCode::OK, Json(ReviewDetailResponse::from(view))).into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// GET /api/reviews/user/:id - Reviews written by one user
pub async fn list_user_reviews(
    State(handlers): State<ReviewHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let Ok(user_id) = user_id.parse::<UserId>() else {
        return invalid_id("user");
    };

    match handlers.list_by_user_handler.handle(user_id).await {
        Ok(views) => {
            let body: Vec<ReviewDetailResponse> = views.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Authenticated commands
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/reviews - Review a song as the current user
pub async fn create_review(
    State(handlers): State<ReviewHandlers>,
    CurrentSession(session): CurrentSession,
    JsonBody(req): JsonBody<CreateReviewRequest>,
) -> Response {
    let song_id = match SongId::new(req.song_id) {
        Ok(id) => id,
        Err(e) => return handle_review_error(e.into()),
    };

    let cmd = CreateReviewCommand {
        user_id: session.user_id,
        song_id,
        body: req.body,
        is_like: req.is_like,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ReviewResponse::new(&result.review, Some(result.aggregate))),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// PATCH /api/reviews/:id - Edit body and/or verdict
pub async fn update_review(
    State(handlers): State<ReviewHandlers>,
    CurrentSession(session): CurrentSession,
    Path(review_id): Path<String>,
    JsonBody(req): JsonBody<UpdateReviewRequest>,
) -> Response {
    let Ok(review_id) = review_id.parse::<ReviewId>() else {
        return invalid_id("review");
    };

    let cmd = UpdateReviewCommand {
        review_id,
        requested_by: session.user_id,
        changes: ReviewChanges {
            body: req.body,
            is_like: req.is_like,
        },
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ReviewResponse::new(&result.review, result.aggregate)),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// DELETE /api/reviews/:id
pub async fn delete_review(
    State(handlers): State<ReviewHandlers>,
    CurrentSession(session): CurrentSession,
    Path(review_id): Path<String>,
) -> Response {
    let Ok(review_id) = review_id.parse::<ReviewId>() else {
        return invalid_id("review");
    };

    let cmd = DeleteReviewCommand {
        review_id,
        requested_by: session.user_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_review_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Admin commands
// ════════════════════════════════════════════════════════════════════════════

/// PATCH /api/admin/reviews/:id/moderation - Count or discount a review
pub async fn moderate_review(
    State(handlers): State<ReviewHandlers>,
    CurrentSession(session): CurrentSession,
    Path(review_id): Path<String>,
    JsonBody(req): JsonBody<ModerateReviewRequest>,
) -> Response {
    let Ok(review_id) = review_id.parse::<ReviewId>() else {
        return invalid_id("review");
    };

    let cmd = ModerateReviewCommand {
        review_id,
        moderator: session.user_id,
        is_valid: req.is_valid,
    };

    match handlers.moderate_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ReviewResponse::new(&result.review, result.aggregate)),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_review_error(error: ReviewError) -> Response {
    if let ReviewError::AggregateStale {
        review_id,
        song_id,
        rolled_back,
        ..
    } = &error
    {
        tracing::error!(
            review_id = %review_id,
            song_id = %song_id,
            rolled_back,
            "Song rating left stale after review write"
        );
    }
    error_response(error.code(), error.to_string())
}
