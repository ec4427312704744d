//! Cross-origin policy applied to every route.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// How long browsers may cache a preflight decision.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(300);

/// Methods callers may use cross-origin.
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Whether an `Origin` header matches `http://*` or `https://*`.
pub fn origin_allowed(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| {
            let host = origin
                .strip_prefix("https://")
                .or_else(|| origin.strip_prefix("http://"));
            host.is_some_and(|host| !host.is_empty())
        })
        .unwrap_or(false)
}

/// Build the CORS layer.
///
/// Preflight requests are answered by the layer itself and never reach a
/// handler. Credentials are not allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| origin_allowed(origin)))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any)
        .expose_headers([header::LINK])
        .allow_credentials(false)
        .max_age(PREFLIGHT_MAX_AGE)
}
