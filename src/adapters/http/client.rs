//! Request metadata recorded on issued sessions.

use std::net::SocketAddr;

use http::{header, HeaderMap};

use crate::domain::session::SessionMetadata;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Client address: first `X-Forwarded-For` entry, else the peer address,
/// else `"unknown"`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

pub fn session_metadata(headers: &HeaderMap, peer: Option<SocketAddr>) -> SessionMetadata {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    SessionMetadata::new(user_agent, client_ip(headers, peer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.168.1.20:51234".parse().unwrap())
    }

    #[test]
    fn forwarded_for_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_peer_then_unknown() {
        assert_eq!(client_ip(&HeaderMap::new(), peer()), "192.168.1.20");
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn metadata_records_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.4"));
        let metadata = session_metadata(&headers, None);
        assert_eq!(metadata.user_agent, "curl/8.4");
        assert_eq!(metadata.ip, "unknown");
    }
}
