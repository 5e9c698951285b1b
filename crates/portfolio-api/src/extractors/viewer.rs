//! Viewer metadata extractor
//!
//! Collects the request attributes that identify an anonymous viewer.
//! Source address precedence: first `X-Forwarded-For` entry, then
//! `X-Real-IP`, then the socket peer.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use portfolio_core::RequestMetadata;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Request metadata of the calling viewer
#[derive(Debug, Clone)]
pub struct ViewerMeta(pub RequestMetadata);

#[async_trait]
impl<S> FromRequestParts<S> for ViewerMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let mut meta = RequestMetadata::new()
            .with_method(parts.method.as_str())
            .with_path(parts.uri.path());

        if let Some(address) = source_address(&parts.headers).or(peer) {
            meta = meta.with_source_address(address);
        }
        if let Some(agent) = header_str(&parts.headers, header::USER_AGENT.as_str()) {
            meta = meta.with_user_agent(agent);
        }

        Ok(ViewerMeta(meta))
    }
}

fn source_address(headers: &HeaderMap) -> Option<String> {
    header_str(headers, X_FORWARDED_FOR)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| header_str(headers, X_REAL_IP).map(str::trim).filter(|s| !s.is_empty()))
        .map(ToString::to_string)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(source_address(&h).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let h = headers(&[("x-real-ip", " 198.51.100.4 ")]);
        assert_eq!(source_address(&h).as_deref(), Some("198.51.100.4"));

        let h = headers(&[("x-forwarded-for", " "), ("x-real-ip", "198.51.100.4")]);
        assert_eq!(source_address(&h).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_no_address_headers() {
        assert_eq!(source_address(&HeaderMap::new()), None);
    }
}
