//! HTTP middleware for axum.
//!
//! - `auth` - Session gate middleware and the `CurrentSession` extractor

pub mod auth;

pub use auth::{require_admin, require_session, AuthRejection, AuthState, CurrentSession};
