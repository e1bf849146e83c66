//! Axum extractor for RequestContext.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::state::AppState;

/// Request-scoped context available to all handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request identifier for tracing.
    pub request_id: Uuid,
    /// Best-effort client identity used for view dedup and login limits.
    pub client_id: String,
}

fn extract_request_id(headers: &HeaderMap) -> Uuid {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Client identity: the peer address.
///
/// Behind a trusted proxy the first `x-forwarded-for` hop, then `x-real-ip`,
/// take precedence. Otherwise both headers are ignored since any caller can
/// set them.
fn extract_client_id(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
            if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
                return first.to_string();
            }
        }
        if let Some(real_ip) = header_str(headers, "x-real-ip") {
            return real_ip.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(RequestContext {
            request_id: extract_request_id(&parts.headers),
            client_id: extract_client_id(&parts.headers, peer, state.trust_proxy_headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        assert_eq!(extract_request_id(&headers).to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        assert_ne!(request_id, Uuid::nil());
    }

    #[test]
    fn test_client_id_prefers_forwarded_for_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());

        assert_eq!(extract_client_id(&headers, None, true), "203.0.113.7");

        headers.remove("x-forwarded-for");
        assert_eq!(extract_client_id(&headers, None, true), "198.51.100.2");
    }

    #[test]
    fn test_client_id_ignores_proxy_headers_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        let peer: SocketAddr = "192.0.2.1:5555".parse().unwrap();

        assert_eq!(extract_client_id(&headers, Some(peer), false), "192.0.2.1");
        assert_eq!(extract_client_id(&headers, None, false), "unknown");
    }

    #[test]
    fn test_client_id_falls_back_to_peer() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "192.0.2.1:5555".parse().unwrap();

        assert_eq!(extract_client_id(&headers, Some(peer), true), "192.0.2.1");
        assert_eq!(extract_client_id(&headers, None, true), "unknown");
    }
}
