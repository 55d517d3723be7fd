//! Password hashing port.
//!
//! Hashing is CPU-bound; implementations are synchronous and callers decide
//! whether to move the work off the async runtime.

use crate::domain::foundation::DomainError;

pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
