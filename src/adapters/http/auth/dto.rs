//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::{UserChanges, UserProfile};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Absent fields deserialize as empty strings so that validation reports
/// which one is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileRequest> for UserChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            avatar_url: req.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Account as returned by register, login and profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
    pub is_banned: bool,
    pub role_id: i32,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.value(),
            email: profile.email,
            username: profile.username,
            avatar_url: profile.avatar_url,
            is_banned: profile.is_banned,
            role_id: profile.role_id.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
