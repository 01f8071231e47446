//! Token revocation endpoint handler (RFC 7009).
//!
//! # Request
//!
//! ```text
//! POST /oauth2/revoke
//! Content-Type: application/x-www-form-urlencoded
//! Authorization: Basic <client_credentials>
//!
//! token=<token>&token_type_hint=access_token
//! ```
//!
//! # Response
//!
//! 200 OK once the client is authenticated, whether or not the token was
//! known: revocation is idempotent and the endpoint must not disclose
//! token existence. 400 for a missing `token` parameter, 401 for failed
//! client authentication, 503 when the provider cannot complete the
//! revocation.

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::{AuthzError, ErrorCode};
use crate::http::AppState;
use crate::http::respond;
use crate::http::token::{authenticate_client, error_response, extract_client_auth};
use crate::oauth::token::TokenRequest;

/// Form parameters for the revocation endpoint, per RFC 7009 section 2.1.
#[derive(Debug, Deserialize)]
pub struct RevocationForm {
    /// The token to revoke.
    #[serde(default)]
    pub token: Option<String>,

    /// Optional hint about the token type.
    #[serde(default)]
    pub token_type_hint: Option<String>,

    /// Client ID (client_secret_post authentication).
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret (client_secret_post authentication).
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Hint about which class of token is being revoked.
///
/// Advisory only: the provider locates the token either way, and an
/// unrecognized hint is ignored per RFC 7009 section 2.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTypeHint {
    /// An access token.
    AccessToken,
    /// A refresh token.
    RefreshToken,
}

/// Parses a token type hint string.
#[must_use]
pub fn parse_token_type_hint(hint: &str) -> Option<TokenTypeHint> {
    match hint {
        "access_token" => Some(TokenTypeHint::AccessToken),
        "refresh_token" => Some(TokenTypeHint::RefreshToken),
        _ => None,
    }
}

/// POST handler for the revocation endpoint.
pub async fn revoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RevocationForm>,
) -> Response {
    let Some(token) = form.token.as_deref().filter(|t| !t.is_empty()) else {
        return respond::json_error(&AuthzError::new(
            ErrorCode::InvalidRequest,
            "Missing required 'token' parameter",
        ));
    };

    // Same client authentication as the token endpoint.
    let token_request = TokenRequest {
        client_id: form.client_id.clone(),
        client_secret: form.client_secret.clone(),
        ..TokenRequest::default()
    };
    let auth = extract_client_auth(&headers, &token_request);
    let basic_auth_used = matches!(
        auth,
        crate::http::token::ClientAuth::Basic { .. }
    );

    let client = match authenticate_client(&state, auth).await {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!(error = %e, "revocation: client authentication failed");
            return error_response(&e, basic_auth_used);
        }
    };

    let hint = form.token_type_hint.as_deref().and_then(parse_token_type_hint);
    tracing::debug!(client_id = %client.id, hint = ?hint, "revoking token");

    match state.provider.revoke_token(token).await {
        Ok(()) => {
            tracing::info!(client_id = %client.id, "token revocation processed");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::error!(client_id = %client.id, error = %e, "token revocation failed");
            respond::json_error(&AuthzError::from_auth_error(&e))
        }
    }
}
