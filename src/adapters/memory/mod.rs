//! In-memory adapters.
//!
//! Used when no database is configured and throughout the test suites.
//! Song, review, and user adapters share one `InMemoryDatabase`.

mod database;
mod review_repository;
mod session_store;
mod song_repository;
mod user_repository;

pub use database::InMemoryDatabase;
pub use review_repository::InMemoryReviewRepository;
pub use session_store::InMemorySessionStore;
pub use song_repository::InMemorySongRepository;
pub use user_repository::InMemoryUserRepository;
