//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST API, session cookie and auth gate
//! - `memory` - In-process storage for development and tests
//! - `postgres` - sqlx-backed repositories
//! - `password` - argon2 password hashing

pub mod http;
pub mod memory;
pub mod password;
pub mod postgres;
