//! Strongly-typed identifier value objects.
//!
//! Catalog entities use database-assigned integer keys. Session tokens are
//! opaque random strings and never leave the session store except as a cookie.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Generates a positive integer identifier newtype.
///
/// Zero and negative values are rejected by `new`, mirroring the database
/// serial columns the ids come from.
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id, rejecting zero or negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        "must be a positive integer",
                    ));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from storage.
            pub fn from_db(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format($field, "not an integer"))?;
                Self::new(value)
            }
        }
    };
}

integer_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);

integer_id!(
    /// Identifier of a song in the catalog.
    SongId,
    "song_id"
);

integer_id!(
    /// Identifier of a review.
    ReviewId,
    "review_id"
);

/// Role assigned to a user. Authorization compares against configured constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i32);

impl RoleId {
    /// Role given to every newly registered account.
    pub const USER: RoleId = RoleId(2);

    /// Role allowed through the admin gate by default.
    pub const ADMIN: RoleId = RoleId(4);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer credential identifying a server-side session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh random token (UUIDv4, 122 bits of entropy).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a token received from a client cookie.
    pub fn from_client(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of debug logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "SessionToken({}…)", prefix)
    }
}
