//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionStore` - Live login sessions keyed by token
//!
//! ## Catalog Ports
//!
//! - `SongRepository` / `SongReader` - Songs and their rating aggregates
//! - `ReviewRepository` / `ReviewReader` - Reviews and review listings
//!
//! ## Account Ports
//!
//! - `UserRepository` - Registered accounts
//! - `UserReader` - Reviewer rankings
//! - `PasswordHasher` - Credential hashing

mod password_hasher;
mod review_reader;
mod review_repository;
mod session_store;
mod song_reader;
mod song_repository;
mod user_reader;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use review_reader::{ReviewAuthor, ReviewReader, ReviewView, ReviewedSong};
pub use review_repository::ReviewRepository;
pub use session_store::SessionStore;
pub use song_reader::SongReader;
pub use song_repository::SongRepository;
pub use user_reader::{TopReviewer, UserReader};
pub use user_repository::UserRepository;
