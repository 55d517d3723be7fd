//! Account and session handlers.
//!
//! Registration, login, logout, profile lookup and editing, password
//! changes, the session authenticator used by the HTTP auth gate, and the
//! optional expired-session sweeper.

mod authenticate;
mod change_password;
mod credentials;
mod get_profile;
mod login;
mod logout;
mod register_user;
mod sweep_sessions;
mod update_profile;

pub use authenticate::SessionAuthenticator;
pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use get_profile::GetProfileHandler;
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use sweep_sessions::{spawn_session_sweeper, sweep_expired_sessions};
pub use update_profile::UpdateProfileHandler;
