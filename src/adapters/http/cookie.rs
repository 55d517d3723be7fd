//! The `session_id` cookie.

use http::{header, HeaderMap, HeaderValue};

use crate::domain::foundation::SessionToken;
use crate::domain::session::Session;

pub const SESSION_COOKIE: &str = "session_id";

/// Reads the session token from the `Cookie` header(s).
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(SessionToken::from_client)
}

/// Builds `Set-Cookie` values for the session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Cookie carrying a freshly issued `session`. Max-Age is the full
    /// session lifetime, measured from the session's own `created_at`.
    pub fn issue(&self, session: &Session) -> HeaderValue {
        self.render(session.token.as_str(), session.max_age_secs(&session.created_at))
    }

    /// Cookie that makes the browser drop the session.
    pub fn clear(&self) -> HeaderValue {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Tokens are UUIDs, so the value is always visible ASCII.
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}
