//! Session domain module.
//!
//! Login sessions: the credential type, its issuance rules, and the errors
//! raised when a request cannot be authenticated or authorized.

mod errors;
mod issuer;
mod session;

pub use errors::AuthError;
pub use issuer::{SessionIssuer, DEFAULT_SESSION_TTL_HOURS, REMEMBER_ME_TTL_DAYS};
pub use session::{Session, SessionIdentity, SessionMetadata};
