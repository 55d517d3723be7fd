//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `session` - Login sessions, issuance, and auth-gate errors
//! - `user` - Registered accounts and credentials
//! - `song` - Song catalog and the rating aggregate
//! - `review` - Reviews, the sole input to a song's aggregate

pub mod foundation;
pub mod review;
pub mod session;
pub mod song;
pub mod user;
