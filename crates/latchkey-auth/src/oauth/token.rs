//! Token endpoint request and response types.
//!
//! One request shape covers all grant types; which fields are required
//! depends on `grant_type`:
//!
//! - `authorization_code`: `code`, `redirect_uri`
//! - `refresh_token`: `refresh_token`, optional `scope`
//!
//! `password` and `client_credentials` are reserved extension points and
//! are answered with `unsupported_grant_type`.

use serde::{Deserialize, Serialize, Serializer};

/// Token endpoint form parameters.
///
/// Clients authenticate with HTTP Basic (not part of this struct) or with
/// `client_id`/`client_secret` in the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequest {
    /// OAuth 2.0 grant type.
    #[serde(default)]
    pub grant_type: String,

    /// Authorization code (authorization_code grant).
    #[serde(default)]
    pub code: Option<String>,

    /// Redirect URI; must byte-equal the one from the authorization
    /// request (authorization_code grant).
    #[serde(default)]
    pub redirect_uri: Option<String>,

    /// PKCE code verifier (RFC 7636). Accepted and carried, not yet
    /// validated.
    #[serde(default)]
    pub code_verifier: Option<String>,

    /// Client ID (client_secret_post authentication).
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret (client_secret_post authentication).
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Refresh token (refresh_token grant).
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Requested scope (refresh_token grant; must be a subset of the
    /// originally granted set).
    #[serde(default)]
    pub scope: Option<String>,
}

/// Successful token response (RFC 6749 section 5.1).
///
/// ```json
/// {
///   "access_token": "2YotnFZFEjr1zCsicMWpAA",
///   "token_type": "bearer",
///   "expires_in": "600",
///   "refresh_token": "tGzv3JOkF0XG5Qx2TlKWIA",
///   "scope": "read write identity"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// The opaque bearer token.
    pub access_token: String,

    /// Token type, always `bearer`.
    pub token_type: String,

    /// Lifetime in whole seconds, serialized as a string.
    #[serde(serialize_with = "seconds_as_string")]
    pub expires_in: u64,

    /// Refresh token, absent for flows that must not emit one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Granted scopes, space-separated.
    pub scope: String,
}

impl TokenResponse {
    /// Creates a token response without a refresh token.
    #[must_use]
    pub fn new(access_token: String, expires_in: u64, scope: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            refresh_token: None,
            scope,
        }
    }

    /// Attaches a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, token: String) -> Self {
        self.refresh_token = Some(token);
        self
    }
}

fn seconds_as_string<S>(secs: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse::new(
            "2YotnFZFEjr1zCsicMWpAA".to_string(),
            600,
            "read write".to_string(),
        );

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""access_token":"2YotnFZFEjr1zCsicMWpAA""#));
        assert!(json.contains(r#""token_type":"bearer""#));
        assert!(json.contains(r#""expires_in":"600""#));
        assert!(json.contains(r#""scope":"read write""#));
        assert!(!json.contains("refresh_token"));
    }

    #[test]
    fn test_token_response_with_refresh_token() {
        let response = TokenResponse::new("at".to_string(), 600, "read".to_string())
            .with_refresh_token("rt".to_string());

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""refresh_token":"rt""#));
    }

    #[test]
    fn test_token_request_defaults() {
        let request = TokenRequest::default();
        assert!(request.grant_type.is_empty());
        assert!(request.code.is_none());
        assert!(request.refresh_token.is_none());
    }

    #[test]
    fn test_token_request_deserialize_json() {
        let json = r#"{
            "grant_type": "authorization_code",
            "code": "SplxlOBeZQQYbYS6WxSbIA",
            "redirect_uri": "https://app.example.com/callback",
            "client_id": "my-app"
        }"#;

        let request: TokenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.grant_type, "authorization_code");
        assert_eq!(request.code.as_deref(), Some("SplxlOBeZQQYbYS6WxSbIA"));
        assert_eq!(
            request.redirect_uri.as_deref(),
            Some("https://app.example.com/callback")
        );
        assert!(request.client_secret.is_none());
        assert!(request.scope.is_none());
    }
}
