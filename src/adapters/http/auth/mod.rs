//! HTTP adapter for registration, login, logout and the caller's profile.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};
pub use handlers::AuthHandlers;
pub use routes::{auth_routes, profile_routes};
