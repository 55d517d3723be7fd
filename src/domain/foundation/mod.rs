//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the catalog, review, and session domains.

mod errors;
mod ids;
mod timestamp;

pub use errors::{require_text, DomainError, ErrorCode, ValidationError};
pub use ids::{ReviewId, RoleId, SessionToken, SongId, UserId};
pub use timestamp::Timestamp;
