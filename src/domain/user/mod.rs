//! User accounts.
//!
//! Accounts are created by registration with role `USER`. Credentials are
//! stored only as argon2 hashes and never appear in debug output.

mod account;
mod errors;

pub use account::{
    validate_password, NewUser, Registration, User, UserChanges, UserProfile, MAX_EMAIL_LENGTH,
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use errors::AccountError;

/// Reviewers returned by the ranking when no limit is given.
pub const DEFAULT_REVIEWER_LIMIT: u32 = 10;
pub const MAX_REVIEWER_LIMIT: u32 = 100;
