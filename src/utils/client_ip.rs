//! Client address and user agent extraction.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

/// Returns the address to record for the client that sent a request.
///
/// When `behind_proxy` is set, the first entry of `X-Forwarded-For` is used,
/// then `X-Real-IP`. Otherwise, or when neither header is present, the socket
/// peer address is returned. The headers are client-controlled, so only
/// enable `behind_proxy` when a trusted reverse proxy overwrites them.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy && let Some(forwarded) = forwarded_ip(headers) {
        return forwarded;
    }

    peer.ip().to_string()
}

/// Returns the `User-Agent` header, or an empty string.
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
}
