//! Response delivery primitives.
//!
//! Four ways out of the authorization server: an HTML consent form, a 302
//! redirect (success or error, query or fragment), and JSON bodies for the
//! token and revocation endpoints. Delivery never mutates persistent
//! state; everything here is pure response construction.

use std::time::Duration;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use url::Url;

use crate::error::AuthzError;

/// Renders an HTML body with the security headers every HTML response
/// from this server carries.
///
/// `Strict-Transport-Security` keeps the user agent on TLS for the
/// configured max-age; the remaining three harden the consent form against
/// content sniffing, reflected XSS, and framing-based clickjacking.
pub(crate) fn html(body: String, sts_max_age: Duration) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::STRICT_TRANSPORT_SECURITY,
                format!("max-age={}", sts_max_age.as_secs()),
            ),
            (header::X_XSS_PROTECTION, "1; mode=block".to_string()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (header::X_FRAME_OPTIONS, "SAMEORIGIN".to_string()),
        ],
        body,
    )
        .into_response()
}

/// A literal `302 Found` redirect.
///
/// RFC 6749 examples use 302 and the grant flows depend on the user agent
/// preserving the GET method, so this is built by hand rather than with
/// the 303/307 helpers.
pub(crate) fn found(location: &Url) -> Response {
    found_raw(location.as_str())
}

/// A `302 Found` redirect to a location the core did not build itself,
/// such as the provider's login URL.
pub(crate) fn found_raw(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// A JSON body with the cache suppression headers RFC 6749 section 5.1
/// requires on token responses.
pub(crate) fn json(status: StatusCode, body: &impl Serialize) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-store"),
            (header::PRAGMA, "no-cache"),
        ],
        serde_json::to_string(body).unwrap_or_default(),
    )
        .into_response()
}

/// A JSON error body, status derived from the wire code.
pub(crate) fn json_error(error: &AuthzError) -> Response {
    let status = StatusCode::from_u16(error.error.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json(status, error)
}
