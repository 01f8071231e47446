//! Authorization endpoint handlers.
//!
//! Implements the authorization endpoint per RFC 6749 sections 4.1.1,
//! 4.1.2, 4.2.1, and 4.2.2 with a server-rendered consent form.
//!
//! # Flow
//!
//! ```text
//! GET /oauth2/authzs?client_id=...
//!     ├─► No resource-owner session → 302 to provider login URL
//!     ├─► Validation failed, no trusted target → Render error in form
//!     ├─► Validation failed, trusted target → 302 with error encoded
//!     └─► Valid → Render consent form
//!
//! POST /oauth2/authzs (same parameters, form body)
//!     ├─► response_type=code  → mint grant → 302 ?code=...&state=...
//!     └─► response_type=token → mint token → 302 #access_token=...
//!
//! DELETE /oauth2/authzs?code=...
//!     └─► Revoke grant, cascade to derived tokens
//! ```

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::{AuthzError, ErrorCode};
use crate::http::AppState;
use crate::http::form::AuthzData;
use crate::http::respond;
use crate::oauth::authorize::{
    AuthorizationRequest, AuthorizationResponse, AuthzParams, ImplicitResponse, Rejection,
    ResponseType, validate,
};
use crate::types::TokenKind;

/// GET handler: renders the consent form, or redirects to login when no
/// resource-owner session exists.
pub async fn authorize_get(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<AuthzParams>,
) -> Response {
    if !state.provider.is_user_authenticated().await {
        let login = state.provider.login_url(&uri.to_string());
        return respond::found_raw(&login);
    }

    match validate(state.provider.as_ref(), &params).await {
        Ok(request) => {
            let data = AuthzData::from_request(&request);
            respond::html(state.form.render(&data), state.sts_max_age)
        }
        Err(rejection) => reject(&state, rejection),
    }
}

/// POST handler: consent submission. Re-runs validation on the form body,
/// then mints a grant code or an implicit access token.
pub async fn authorize_post(
    State(state): State<AppState>,
    uri: Uri,
    Form(params): Form<AuthzParams>,
) -> Response {
    if !state.provider.is_user_authenticated().await {
        let login = state.provider.login_url(&uri.to_string());
        return respond::found_raw(&login);
    }

    let request = match validate(state.provider.as_ref(), &params).await {
        Ok(request) => request,
        Err(rejection) => return reject(&state, rejection),
    };

    match request.response_type {
        ResponseType::Code => code_grant(&state, &request).await,
        ResponseType::Token => implicit_grant(&state, &request).await,
    }
}

/// Issues an authorization code and delivers it in the query component
/// (RFC 6749 section 4.1.2).
async fn code_grant(state: &AppState, request: &AuthorizationRequest) -> Response {
    let grant = match state
        .provider
        .gen_authz_code(&request.client, &request.scopes)
        .await
    {
        Ok(grant) => grant,
        Err(e) => {
            tracing::error!(client_id = %request.client.id, error = %e, "grant code mint failed");
            let data =
                AuthzData::from_errors(vec![AuthzError::server_error(
                    Some(request.state.clone()),
                    &e,
                )]);
            return respond::html(state.form.render(&data), state.sts_max_age);
        }
    };

    let response = AuthorizationResponse::new(grant.code, request.state.clone());
    respond::found(&response.to_redirect_url(&request.redirect_uri))
}

/// Issues an access token directly and delivers it in the fragment
/// component (RFC 6749 section 4.2.2). Never mints a refresh token: an
/// implicit-flow token has no grant to hang one off of, and the fragment
/// would expose it to the user agent.
async fn implicit_grant(state: &AppState, request: &AuthorizationRequest) -> Response {
    let token = match state
        .provider
        .gen_token(TokenKind::Access, &request.client, &request.scopes, None)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(client_id = %request.client.id, error = %e, "implicit token mint failed");
            let error = AuthzError::server_error(Some(request.state.clone()), &e);
            return respond::found(&error.encoded_in_fragment(&request.redirect_uri));
        }
    };

    let response = ImplicitResponse::new(&token, request.state.clone());
    respond::found(&response.to_redirect_url(&request.redirect_uri))
}

/// Query parameters for grant revocation.
#[derive(Debug, Deserialize)]
pub struct RevokeGrantParams {
    /// The grant code to revoke.
    #[serde(default)]
    pub code: Option<String>,
}

/// DELETE handler: revokes a grant code and, through the provider, every
/// token derived from it. Idempotent.
pub async fn authorize_delete(
    State(state): State<AppState>,
    Query(params): Query<RevokeGrantParams>,
) -> Response {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return respond::json_error(&AuthzError::new(
            ErrorCode::InvalidRequest,
            "code parameter is required to revoke a grant.",
        ));
    };

    match state.provider.revoke_authz_code(&code).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "grant revocation failed");
            respond::json_error(&AuthzError::from_auth_error(&e))
        }
    }
}

/// Turns a validation rejection into its response: rendered into the
/// consent form when no trusted redirect target exists, encoded into the
/// redirect URI otherwise.
fn reject(state: &AppState, rejection: Rejection) -> Response {
    match rejection {
        Rejection::Render(error) => {
            let data = AuthzData::from_errors(vec![error]);
            respond::html(state.form.render(&data), state.sts_max_age)
        }
        Rejection::Redirect {
            uri,
            error,
            channel,
        } => respond::found(&Rejection::redirect_location(&uri, &error, channel)),
    }
}
