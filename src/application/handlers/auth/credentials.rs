//! Password hashing and verification on the blocking pool.
//!
//! argon2 takes tens of milliseconds per call, so both operations run under
//! `spawn_blocking`. The plaintext stays wrapped in `Secret` until the
//! closure hands it to the hasher.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};

use crate::domain::user::AccountError;
use crate::ports::PasswordHasher;

pub(super) async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &Secret<String>,
) -> Result<String, AccountError> {
    let hasher = Arc::clone(hasher);
    let password = password.clone();
    tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
        .await
        .map_err(|e| AccountError::infrastructure(format!("hashing task failed: {}", e)))?
        .map_err(AccountError::from)
}

pub(super) async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &Secret<String>,
    hash: &str,
) -> Result<bool, AccountError> {
    let hasher = Arc::clone(hasher);
    let password = password.clone();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &hash))
        .await
        .map_err(|e| AccountError::infrastructure(format!("verify task failed: {}", e)))?
        .map_err(AccountError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::password::Argon2PasswordHasher;

    #[tokio::test]
    async fn hash_then_verify_accepts_only_the_original() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let password = Secret::new("open sesame".to_string());

        let hash = hash_password(&hasher, &password).await.unwrap();

        assert!(verify_password(&hasher, &password, &hash).await.unwrap());
        let other = Secret::new("open sesame!".to_string());
        assert!(!verify_password(&hasher, &other, &hash).await.unwrap());
    }
}
