//! Request inspection.
//!
//! # Responsibilities
//! - Read the request ID set by the request-id layer
//! - Determine the client IP (CDN header first, then peer address)
//! - Capture request context for failure reports
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Context captured before the handler consumes the request

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use std::net::SocketAddr;

use crate::observability::RequestContext;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID header value, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Client IP from `header_name` (first entry of a list), else the peer address.
pub fn client_ip(headers: &HeaderMap, header_name: &str, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Peer address, when the server was started with connect info.
pub fn peer_addr(request: &Request<Body>) -> Option<SocketAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

pub fn context(request: &Request<Body>) -> RequestContext {
    RequestContext {
        request_id: request_id(request.headers()),
        method: request.method().clone(),
        uri: request.uri().clone(),
        headers: request.headers().clone(),
    }
}
