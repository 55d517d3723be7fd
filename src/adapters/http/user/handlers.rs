//! HTTP handlers for user rankings.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::QueryParams;
use crate::application::handlers::user::{TopReviewersHandler, TopReviewersQuery};

use super::dto::{TopReviewerResponse, TopReviewersParams};

#[derive(Clone)]
pub struct UserHandlers {
    pub top_reviewers_handler: Arc<TopReviewersHandler>,
}

/// GET /api/users/top-reviewers?limit=N
pub async fn top_reviewers(
    State(handlers): State<UserHandlers>,
    QueryParams(params): QueryParams<TopReviewersParams>,
) -> Response {
    let query = TopReviewersQuery {
        limit: params.limit,
    };

    match handlers.top_reviewers_handler.handle(query).await {
        Ok(reviewers) => {
            let body: Vec<TopReviewerResponse> = reviewers.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e.code(), e.to_string()),
    }
}
