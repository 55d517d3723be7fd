//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes; `router`
//! assembles them under `/api`.

pub mod auth;
pub mod client;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod review;
pub mod router;
pub mod song;
pub mod user;

pub use error::ErrorResponse;
pub use router::{api_router, app_router, Adapters, AppState};
