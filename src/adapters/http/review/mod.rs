//! HTTP adapter for review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateReviewRequest, ModerateReviewRequest, ReviewDetailResponse, ReviewResponse,
    SongRatingResponse, UpdateReviewRequest,
};
pub use handlers::ReviewHandlers;
pub use routes::{admin_review_routes, review_routes};
