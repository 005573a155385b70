//! Response shaping.
//!
//! # Responsibilities
//! - Turn a resolution into an HTTP response
//! - Build redirects (302 + `Location` + meta-refresh body)
//! - Serve the route table as JSON
//! - Map failures to the uniform failure page
//!
//! # Design Decisions
//! - `Location` is percent-encoded only where header syntax demands it
//! - Development mode returns the raw error instead of the failure page

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::Environment;
use crate::http::render;
use crate::routing::{Resolution, RouteEntry};

/// Bytes that cannot appear raw in a `Location` value. Non-ASCII is always encoded.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

pub fn from_resolution(resolution: Resolution) -> Response {
    match resolution {
        Resolution::Resolved(matched) => redirect(&matched.target),
        Resolution::Fallback { target } | Resolution::Landing { target } => redirect(&target),
        Resolution::Ambiguous { path, candidates } => {
            (StatusCode::OK, Html(render::ambiguous_page(&path, &candidates))).into_response()
        }
        Resolution::RouteDump(routes) => routes_json(&routes),
        Resolution::NotFound => not_found(),
    }
}

/// Encode `target` so it is a valid header value.
pub fn encode_location(target: &str) -> String {
    utf8_percent_encode(target, LOCATION_ENCODE_SET).to_string()
}

/// 302 to `target`.
pub fn redirect(target: &str) -> Response {
    let location = encode_location(target);
    let value = match HeaderValue::from_str(&location) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(target = %target, error = %e, "Unrepresentable redirect target");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response();
        }
    };

    (
        StatusCode::FOUND,
        [(header::LOCATION, value)],
        Html(render::redirect_page(&location)),
    )
        .into_response()
}

/// Every route as a pretty-printed JSON array, readable cross-origin.
pub fn routes_json(routes: &[RouteEntry]) -> Response {
    match serde_json::to_string_pretty(routes) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize routes");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize routes").into_response()
        }
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Failure response for an error that escaped resolution.
pub fn failure<E>(error: &E, request_id: &str, environment: Environment) -> Response
where
    E: std::error::Error,
{
    if environment.is_development() {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", error)).into_response();
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render::failure_page(request_id, &error.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MatchResult;
    use crate::wiki::{SearchQuery, WikiError};

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_encode_location() {
        assert_eq!(encode_location("https://x/a%20b?q=1"), "https://x/a%20b?q=1");
        assert_eq!(encode_location("https://x/a b"), "https://x/a%20b");
        assert_eq!(encode_location("https://x/ก"), "https://x/%E0%B8%81");
    }

    #[tokio::test]
    async fn test_redirect_response() {
        let response = from_resolution(Resolution::Resolved(MatchResult {
            route: RouteEntry::new("a", "https://one", "d"),
            target: "https://one/a b".into(),
        }));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://one/a%20b");
        let body = body_string(response).await;
        assert!(body.contains("url=https://one/a%20b"));
    }

    #[tokio::test]
    async fn test_routes_json_headers() {
        let response = routes_json(&[RouteEntry::new("a", "https://one", "d")]);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_failure_by_environment() {
        let error = WikiError::Status {
            query: SearchQuery::Shortcuts,
            status: 502,
        };

        let production = failure(&error, "r1", Environment::Production);
        assert_eq!(production.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(production).await;
        assert!(body.contains("Technical details"));
        assert!(body.contains("HTTP error! status: 502"));

        let development = failure(&error, "r1", Environment::Development);
        assert_eq!(development.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(development).await;
        assert!(body.starts_with("Status {"));
    }
}
