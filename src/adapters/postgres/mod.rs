//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Registered accounts
//! - `PostgresSongRepository` - Song catalog, rating aggregate, rankings
//! - `PostgresReviewRepository` - Reviews and joined review listings
//!
//! The schema lives in `migrations/` at the crate root.

mod review_repository;
mod row;
mod song_repository;
mod user_repository;

pub use review_repository::PostgresReviewRepository;
pub use song_repository::PostgresSongRepository;
pub use user_repository::PostgresUserRepository;
