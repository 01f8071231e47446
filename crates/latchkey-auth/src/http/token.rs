//! Token endpoint handler.
//!
//! Handles POST requests with an `application/x-www-form-urlencoded` body
//! per RFC 6749 section 3.2.
//!
//! # Client authentication
//!
//! Clients authenticate with either:
//! - HTTP Basic: `Authorization: Basic <base64(client_id:client_secret)>`
//! - Request body: `client_id` and `client_secret` parameters
//!
//! # Grant types
//!
//! - `authorization_code`: requires `code` and `redirect_uri`
//! - `refresh_token`: requires `refresh_token`, accepts `scope`
//! - `password`, `client_credentials`: reserved, answered with
//!   `unsupported_grant_type`

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AuthError, AuthResult, AuthzError, ErrorCode, GRANT_REVOKED_DESC};
use crate::http::AppState;
use crate::http::respond;
use crate::oauth::token::{TokenRequest, TokenResponse};
use crate::types::{Client, Scope, TokenKind, scope};

/// POST handler for the token endpoint.
pub async fn token_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<TokenRequest>,
) -> Response {
    tracing::debug!(
        grant_type = %request.grant_type,
        client_id = ?request.client_id,
        "processing token request"
    );

    let auth = extract_client_auth(&headers, &request);
    let basic_auth_used = matches!(auth, ClientAuth::Basic { .. });

    let client = match authenticate_client(&state, auth).await {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "client authentication failed");
            return error_response(&e, basic_auth_used);
        }
    };

    let result = match request.grant_type.as_str() {
        "authorization_code" => exchange_code(&state, &request, &client).await,
        "refresh_token" => refresh(&state, &request, &client).await,
        // Reserved extension points; recognized but not implemented.
        "password" | "client_credentials" => {
            Err(AuthError::unsupported_grant_type(&request.grant_type))
        }
        "" => Err(AuthError::invalid_request("Missing grant_type parameter")),
        other => Err(AuthError::unsupported_grant_type(other)),
    };

    match result {
        Ok(response) => {
            tracing::info!(
                client_id = %client.id,
                grant_type = %request.grant_type,
                "token issued"
            );
            respond::json(axum::http::StatusCode::OK, &response)
        }
        Err(e) => {
            tracing::warn!(
                client_id = %client.id,
                grant_type = %request.grant_type,
                error = %e,
                "token request failed"
            );
            error_response(&e, basic_auth_used)
        }
    }
}

/// Client credentials extracted from the request.
pub(crate) enum ClientAuth {
    /// HTTP Basic authentication.
    Basic {
        /// Client identifier.
        client_id: String,
        /// Client secret.
        client_secret: String,
    },
    /// Credentials in the request body.
    Body {
        /// Client identifier.
        client_id: String,
        /// Client secret.
        client_secret: String,
    },
    /// No credentials provided.
    None,
}

/// Extracts client authentication from the Authorization header or the
/// request body, preferring the header.
pub(crate) fn extract_client_auth(headers: &HeaderMap, request: &TokenRequest) -> ClientAuth {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(encoded) = auth_str.strip_prefix("Basic ")
        && let Ok(decoded) = STANDARD.decode(encoded.trim())
        && let Ok(creds) = String::from_utf8(decoded)
        && let Some((client_id, client_secret)) = creds.split_once(':')
    {
        return ClientAuth::Basic {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
    }

    if let (Some(client_id), Some(client_secret)) =
        (request.client_id.as_ref(), request.client_secret.as_ref())
    {
        return ClientAuth::Body {
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
        };
    }

    ClientAuth::None
}

/// Authenticates the client against the provider's registry.
pub(crate) async fn authenticate_client(
    state: &AppState,
    auth: ClientAuth,
) -> AuthResult<Client> {
    let (client_id, client_secret) = match auth {
        ClientAuth::Basic {
            client_id,
            client_secret,
        }
        | ClientAuth::Body {
            client_id,
            client_secret,
        } => (client_id, client_secret),
        ClientAuth::None => {
            return Err(AuthError::invalid_client("No client credentials provided"));
        }
    };

    let client = state
        .provider
        .client_info(&client_id)
        .await?
        .ok_or_else(|| AuthError::invalid_client("Unknown client"))?;

    let valid = state
        .provider
        .verify_client_secret(&client_id, &client_secret)
        .await?;
    if !valid {
        return Err(AuthError::invalid_client("Invalid client credentials"));
    }

    Ok(client)
}

/// Exchanges an authorization code for an access and refresh token pair
/// (RFC 6749 section 4.1.3).
///
/// The provider consumes the code atomically; this function then enforces
/// the client binding and the byte-equality of the redirect URI. Any
/// violation revokes the grant, cascading to every token already derived
/// from it, and surfaces the single non-disclosing `invalid_grant`
/// description.
async fn exchange_code(
    state: &AppState,
    request: &TokenRequest,
    client: &Client,
) -> AuthResult<TokenResponse> {
    let code = request
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AuthError::invalid_request("Missing code parameter"))?;

    let redirect_uri = request
        .redirect_uri
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AuthError::invalid_request("Missing redirect_uri parameter"))?;

    let grant = state.provider.redeem_authz_code(code).await?;

    // The code must belong to the authenticated client.
    if grant.client_id != client.id {
        revoke_after_violation(state, code).await;
        return Err(AuthError::invalid_grant(GRANT_REVOKED_DESC));
    }

    // The redirect URI must byte-equal the one captured at grant creation
    // (RFC 6749 section 4.1.3); a mismatch means a leaked code is being
    // replayed through a different callback.
    if grant.redirect_uri.as_str() != redirect_uri {
        revoke_after_violation(state, code).await;
        return Err(AuthError::invalid_grant(GRANT_REVOKED_DESC));
    }

    let access = state
        .provider
        .gen_token(TokenKind::Access, client, &grant.scopes, Some(&grant.code))
        .await?;
    let refresh = state
        .provider
        .gen_token(TokenKind::Refresh, client, &grant.scopes, Some(&grant.code))
        .await?;

    Ok(TokenResponse::new(
        access.value,
        access.expires_in.as_secs(),
        scope::stringify(&access.scopes),
    )
    .with_refresh_token(refresh.value))
}

/// Cascade-revokes a grant whose binding checks failed. The violation
/// response is `invalid_grant` either way, so a revocation failure is
/// logged rather than surfaced.
async fn revoke_after_violation(state: &AppState, code: &str) {
    if let Err(e) = state.provider.revoke_authz_code(code).await {
        tracing::error!(error = %e, "cascade revocation after grant violation failed");
    }
}

/// Issues a fresh access token against a refresh token (RFC 6749 section
/// 6). The new token's scope must be a subset of the refresh token's
/// scope; the provider rejects upgrades with `invalid_scope`.
async fn refresh(
    state: &AppState,
    request: &TokenRequest,
    client: &Client,
) -> AuthResult<TokenResponse> {
    let refresh_token = request
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::invalid_request("Missing refresh_token parameter"))?;

    // An absent scope requests the refresh token's full scope.
    let scopes: Vec<Scope> = match request.scope.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => state.provider.scopes_info(raw).await?,
        None => Vec::new(),
    };

    let token = state.provider.refresh_token(refresh_token, &scopes).await?;

    tracing::debug!(client_id = %client.id, "access token refreshed");

    Ok(TokenResponse::new(
        token.value,
        token.expires_in.as_secs(),
        scope::stringify(&token.scopes),
    ))
}

/// Maps an internal error onto the JSON error body, adding the
/// `WWW-Authenticate` challenge when Basic authentication failed.
pub(crate) fn error_response(error: &AuthError, basic_auth_used: bool) -> Response {
    let wire = AuthzError::from_auth_error(error);

    let mut response = respond::json_error(&wire);
    if wire.error == ErrorCode::InvalidClient && basic_auth_used {
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Basic realm=\"oauth2\""),
        );
    }
    response
}
