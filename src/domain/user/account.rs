//! Registered user accounts.

use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{require_text, RoleId, Timestamp, UserId, ValidationError};

/// Maximum length for an email address.
pub const MAX_EMAIL_LENGTH: usize = 150;

/// Maximum length for a username.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Minimum length for a plaintext password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validated registration input. The password stays wrapped until the
/// application layer hashes it.
#[derive(Clone)]
pub struct Registration {
    email: String,
    username: String,
    password: Secret<String>,
}

impl Registration {
    /// # Errors
    ///
    /// - `EmptyField` if email, username, or password is blank
    /// - `TooLong` if email or username exceeds its limit
    /// - `TooShort` if the password has fewer than 8 characters
    pub fn new(
        email: String,
        username: String,
        password: Secret<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.trim().to_string();
        require_text("email", &email, MAX_EMAIL_LENGTH)?;
        require_text("username", &username, MAX_USERNAME_LENGTH)?;
        validate_password(password.expose_secret())?;

        Ok(Self {
            email,
            username,
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
}

/// Checks a plaintext password against the registration rules.
///
/// # Errors
///
/// - `EmptyField` if blank
/// - `TooShort` if it has fewer than 8 characters
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_short("password", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Row to insert for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// A stored user account.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub is_banned: bool,
    pub role_id: RoleId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser, now: Timestamp) -> Self {
        Self {
            id,
            email: new.email,
            username: new.username,
            password_hash: new.password_hash,
            avatar_url: String::new(),
            is_banned: false,
            role_id: new.role_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated profile changes. Emails are stored trimmed.
    pub fn apply(&mut self, changes: UserChanges, now: Timestamp) -> Result<(), ValidationError> {
        changes.validate()?;
        if changes.is_empty() {
            return Ok(());
        }

        if let Some(email) = changes.email {
            self.email = email.trim().to_string();
        }
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(avatar_url) = changes.avatar_url {
            self.avatar_url = avatar_url;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn set_password_hash(&mut self, password_hash: String, now: Timestamp) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }

    pub fn is_admin(&self, admin_role: RoleId) -> bool {
        self.role_id == admin_role
    }

    /// Public view of the account, without credentials.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            is_banned: self.is_banned,
            role_id: self.role_id,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("is_banned", &self.is_banned)
            .field("role_id", &self.role_id)
            .finish_non_exhaustive()
    }
}

/// Partial update of an account's public details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.avatar_url.is_none()
    }

    /// # Errors
    ///
    /// - `EmptyField` / `TooLong` for a supplied email or username
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            require_text("email", email.trim(), MAX_EMAIL_LENGTH)?;
        }
        if let Some(username) = &self.username {
            require_text("username", username, MAX_USERNAME_LENGTH)?;
        }
        Ok(())
    }
}

/// Account data that is safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
    pub is_banned: bool,
    pub role_id: RoleId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(password: &str) -> Secret<String> {
        Secret::new(password.to_string())
    }

    #[test]
    fn registration_trims_email() {
        let reg = Registration::new(
            "  dj@example.com ".into(),
            "dj".into(),
            secret("longenough"),
        )
        .unwrap();
        assert_eq!(reg.email(), "dj@example.com");
    }

    #[test]
    fn registration_requires_all_fields() {
        assert_eq!(
            Registration::new(String::new(), "dj".into(), secret("longenough")).unwrap_err(),
            ValidationError::empty_field("email")
        );
        assert_eq!(
            Registration::new("a@b.c".into(), " ".into(), secret("longenough")).unwrap_err(),
            ValidationError::empty_field("username")
        );
        assert_eq!(
            Registration::new("a@b.c".into(), "dj".into(), secret("")).unwrap_err(),
            ValidationError::empty_field("password")
        );
    }

    #[test]
    fn registration_rejects_short_password() {
        let err = Registration::new("a@b.c".into(), "dj".into(), secret("1234567")).unwrap_err();
        assert_eq!(err, ValidationError::too_short("password", 8));
    }

    #[test]
    fn registration_rejects_long_email() {
        let email = format!("{}@example.com", "x".repeat(150));
        let err = Registration::new(email, "dj".into(), secret("longenough")).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 150, .. }));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let reg = Registration::new("a@b.c".into(), "dj".into(), secret("hunter2hunter2")).unwrap();
        assert!(!format!("{:?}", reg).contains("hunter2"));

        let user = User::from_new(
            UserId::from_db(1),
            NewUser {
                email: "a@b.c".into(),
                username: "dj".into(),
                password_hash: "$argon2id$secret".into(),
                role_id: RoleId::USER,
            },
            Timestamp::now(),
        );
        assert!(!format!("{:?}", user).contains("argon2id"));
    }

    fn stored_user() -> User {
        User::from_new(
            UserId::from_db(1),
            NewUser {
                email: "dj@example.com".into(),
                username: "dj".into(),
                password_hash: "hash".into(),
                role_id: RoleId::USER,
            },
            Timestamp::now().minus_days(1),
        )
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut user = stored_user();
        let now = Timestamp::now();

        user.apply(
            UserChanges {
                email: Some(" new@example.com ".into()),
                avatar_url: Some("https://img.example/me.png".into()),
                ..Default::default()
            },
            now,
        )
        .unwrap();

        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.username, "dj");
        assert_eq!(user.avatar_url, "https://img.example/me.png");
        assert_eq!(user.updated_at, now);
    }

    #[test]
    fn apply_rejects_blank_username_and_long_email() {
        let mut user = stored_user();
        let err = user
            .apply(
                UserChanges {
                    username: Some("  ".into()),
                    ..Default::default()
                },
                Timestamp::now(),
            )
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("username"));

        let err = user
            .apply(
                UserChanges {
                    email: Some(format!("{}@example.com", "x".repeat(150))),
                    ..Default::default()
                },
                Timestamp::now(),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 150, .. }));
        assert_eq!(user.email, "dj@example.com");
    }

    #[test]
    fn empty_changes_leave_updated_at_alone() {
        let mut user = stored_user();
        let before = user.updated_at;
        user.apply(UserChanges::default(), Timestamp::now()).unwrap();
        assert_eq!(user.updated_at, before);
    }

    #[test]
    fn new_user_is_not_banned_and_not_admin() {
        let user = User::from_new(
            UserId::from_db(1),
            NewUser {
                email: "a@b.c".into(),
                username: "dj".into(),
                password_hash: "hash".into(),
                role_id: RoleId::USER,
            },
            Timestamp::now(),
        );
        assert!(!user.is_banned);
        assert!(!user.is_admin(RoleId::ADMIN));
        assert_eq!(user.profile().username, "dj");
    }
}
