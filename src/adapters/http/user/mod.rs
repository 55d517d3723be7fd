//! HTTP adapter for public user rankings.

mod dto;
mod handlers;
mod routes;

pub use dto::{TopReviewerResponse, TopReviewersParams};
pub use handlers::UserHandlers;
pub use routes::user_routes;
