//! Authorization endpoint request validation and response types.
//!
//! The validator runs the RFC 6749 preconditions in a fixed order because
//! the order decides the delivery channel: until the redirect URI has been
//! parsed, checked for HTTPS, and matched byte-for-byte against the
//! registered one, there is no trusted redirect target and failures must be
//! rendered into the consent form. From that point on failures are encoded
//! into the (now trusted) redirect URI instead. Reordering these checks
//! would hand tokens to attacker-controlled URIs.
//!
//! ```text
//! client_id missing ──────────► render invalid_request
//! client lookup failed ───────► render server_error
//! client unknown ─────────────► render invalid_request
//! redirect_uri unparseable ───► render access_denied
//! redirect_uri not https ─────► render access_denied
//! redirect_uri != registered ─► render access_denied
//! ---- trusted redirect target exists below this line ----
//! state missing ──────────────► redirect invalid_request
//! response_type unknown ──────► redirect unsupported_response_type
//! scope missing ──────────────► redirect invalid_request
//! scope catalogue failure ────► redirect server_error
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AuthzError;
use crate::provider::Provider;
use crate::types::{Client, Scope, Token, scope};

/// Raw authorization endpoint parameters, before validation.
///
/// Arrives as the query string on GET and as the form body on POST; both
/// carry the same fields. Everything is optional here so that a missing
/// parameter reaches the validator (which owns the error channel decision)
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzParams {
    /// Client identifier.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Redirection URI; falls back to the client's registered URI.
    #[serde(default)]
    pub redirect_uri: Option<String>,

    /// Requested response type, `code` or `token`.
    #[serde(default)]
    pub response_type: Option<String>,

    /// Requested scopes, space-separated.
    #[serde(default)]
    pub scope: Option<String>,

    /// Opaque client state, echoed back on every redirect (CSRF
    /// protection, RFC 6749 section 10.12).
    #[serde(default)]
    pub state: Option<String>,

    /// PKCE challenge (RFC 7636). Accepted and carried, not yet validated.
    #[serde(default)]
    pub code_challenge: Option<String>,

    /// PKCE challenge method. Accepted and carried, not yet validated.
    #[serde(default)]
    pub code_challenge_method: Option<String>,
}

/// Grant flavors selected by `response_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Authorization code flow (RFC 6749 section 4.1).
    Code,
    /// Implicit flow (RFC 6749 section 4.2).
    Token,
}

impl ResponseType {
    /// Parses the `response_type` parameter value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "code" => Some(Self::Code),
            "token" => Some(Self::Token),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The validated, in-memory projection of an authorization request.
///
/// Exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// The registered client making the request.
    pub client: Client,

    /// Parsed scope set, unknown names already dropped by the provider.
    pub scopes: Vec<Scope>,

    /// Selected grant flavor.
    pub response_type: ResponseType,

    /// Opaque client state to echo back.
    pub state: String,

    /// The validated redirect target. Byte-equal to the registered URI.
    pub redirect_uri: Url,

    /// PKCE challenge, carried for forward compatibility.
    pub code_challenge: Option<String>,

    /// PKCE challenge method, carried for forward compatibility.
    pub code_challenge_method: Option<String>,
}

/// Which component of the redirect URI carries an encoded error.
///
/// Errors travel the same channel their flow's success response would:
/// query for the authorization-code flow, fragment for the implicit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorChannel {
    /// Encode into the query string.
    Query,
    /// Encode into the URI fragment.
    Fragment,
}

/// A rejected authorization request, tagged with its delivery channel.
#[derive(Debug, Clone)]
pub enum Rejection {
    /// No trusted redirect target exists; the error is rendered into the
    /// consent form.
    Render(AuthzError),

    /// A trusted redirect target exists; the error is encoded into it.
    Redirect {
        /// The validated redirect URI.
        uri: Url,
        /// The error to encode.
        error: AuthzError,
        /// Query or fragment, following the flow's success channel.
        channel: ErrorChannel,
    },
}

impl Rejection {
    /// Builds the redirect `Location` for a [`Rejection::Redirect`].
    #[must_use]
    pub fn redirect_location(uri: &Url, error: &AuthzError, channel: ErrorChannel) -> Url {
        match channel {
            ErrorChannel::Query => error.encoded_in_query(uri),
            ErrorChannel::Fragment => error.encoded_in_fragment(uri),
        }
    }
}

/// Validates raw authorization parameters against the RFC 6749 section
/// 4.1.1 / 4.2.1 preconditions, in the fixed order documented on this
/// module.
///
/// # Errors
///
/// Returns a [`Rejection`] naming the failed precondition and the channel
/// it must be delivered on.
pub async fn validate(
    provider: &dyn Provider,
    params: &AuthzParams,
) -> Result<AuthorizationRequest, Rejection> {
    // 1. If the client identifier is missing, the server SHOULD inform the
    //    resource owner and MUST NOT redirect (RFC 6749 section 4.1.2.1).
    let client_id = match params.client_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(Rejection::Render(AuthzError::client_id_missing())),
    };

    // 2. Registry lookup.
    let client = match provider.client_info(client_id).await {
        Ok(Some(client)) => client,
        Ok(None) => return Err(Rejection::Render(AuthzError::client_not_found())),
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "client lookup failed");
            return Err(Rejection::Render(AuthzError::server_error(None, &e)));
        }
    };

    // 3. A missing, invalid, or mismatching redirection URI MUST NOT be
    //    redirected to. Parse failures are rendered, never echoed into an
    //    attacker-supplied URI.
    let redirect_uri = match params.redirect_uri.as_deref() {
        Some(raw) if !raw.is_empty() => match Url::parse(raw) {
            Ok(url) => url,
            Err(_) => return Err(Rejection::Render(AuthzError::redirect_uri_invalid())),
        },
        _ => client.redirect_uri.clone(),
    };

    // 4. Grant codes and tokens never cross plaintext.
    if redirect_uri.scheme() != "https" {
        return Err(Rejection::Render(AuthzError::redirect_uri_invalid()));
    }

    // 5. Exact match against the registered URI (RFC 6749 section 3.1.2),
    //    byte-for-byte rather than prefix matching.
    if redirect_uri.as_str() != client.redirect_uri.as_str() {
        return Err(Rejection::Render(AuthzError::redirect_uri_mismatch()));
    }

    // 6. From here on a trusted redirect target exists; remaining failures
    //    are delivered through it, on the channel the requested flow would
    //    use for success.
    let channel = if params.response_type.as_deref() == Some("token") {
        ErrorChannel::Fragment
    } else {
        ErrorChannel::Query
    };

    // 7. `state` is required by this server: without it the client cannot
    //    defend its callback against CSRF (RFC 6749 section 10.12).
    let state = match params.state.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            return Err(Rejection::Redirect {
                uri: redirect_uri,
                error: AuthzError::state_required(),
                channel,
            });
        }
    };

    // 8. response_type must be `code` or `token`.
    let response_type = match params.response_type.as_deref().and_then(ResponseType::parse) {
        Some(rt) => rt,
        None => {
            return Err(Rejection::Redirect {
                uri: redirect_uri,
                error: AuthzError::unsupported_response_type(state),
                channel,
            });
        }
    };

    // 9. `scope` is required (RFC 6749 section 3.3).
    let raw_scope = match params.scope.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(Rejection::Redirect {
                uri: redirect_uri,
                error: AuthzError::scope_required(state),
                channel,
            });
        }
    };

    // 10. The provider parses the scope set, dropping unknown names.
    let scopes = match provider.scopes_info(raw_scope).await {
        Ok(scopes) => scopes,
        Err(e) => {
            tracing::error!(error = %e, "scope catalogue lookup failed");
            return Err(Rejection::Redirect {
                uri: redirect_uri,
                error: AuthzError::server_error(Some(state), &e),
                channel,
            });
        }
    };

    Ok(AuthorizationRequest {
        client,
        scopes,
        response_type,
        state,
        redirect_uri,
        code_challenge: params.code_challenge.clone(),
        code_challenge_method: params.code_challenge_method.clone(),
    })
}

/// Successful authorization-code response, delivered in the query
/// component of the redirect URI (RFC 6749 section 4.1.2).
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationResponse {
    /// The freshly minted grant code.
    pub code: String,

    /// Echoed state parameter.
    pub state: String,
}

impl AuthorizationResponse {
    /// Creates a new authorization response.
    #[must_use]
    pub fn new(code: String, state: String) -> Self {
        Self { code, state }
    }

    /// Builds the redirect URL carrying the code and state.
    #[must_use]
    pub fn to_redirect_url(&self, redirect_uri: &Url) -> Url {
        let mut url = redirect_uri.clone();
        url.query_pairs_mut()
            .append_pair("code", &self.code)
            .append_pair("state", &self.state);
        url
    }
}

/// Successful implicit-flow response, delivered in the fragment component
/// of the redirect URI (RFC 6749 section 4.2.2).
///
/// The fragment is deliberate: user agents do not send it in the Referer
/// header, so the access token never reaches this server's logs or any
/// third party the callback page links out to.
#[derive(Debug, Clone)]
pub struct ImplicitResponse {
    /// The freshly minted access token value.
    pub access_token: String,

    /// Token type, `bearer`.
    pub token_type: String,

    /// Lifetime in whole seconds.
    pub expires_in_secs: u64,

    /// Granted scope set, space-separated.
    pub scope: String,

    /// Echoed state parameter.
    pub state: String,
}

impl ImplicitResponse {
    /// Projects a minted token into the fragment wire form.
    #[must_use]
    pub fn new(token: &Token, state: String) -> Self {
        Self {
            access_token: token.value.clone(),
            token_type: token.token_type.clone(),
            expires_in_secs: token.expires_in.as_secs(),
            scope: scope::stringify(&token.scopes),
            state,
        }
    }

    /// Builds the redirect URL with all parameters in the fragment. A
    /// single `#` followed by `application/x-www-form-urlencoded` pairs.
    #[must_use]
    pub fn to_redirect_url(&self, redirect_uri: &Url) -> Url {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("access_token", &self.access_token)
            .append_pair("token_type", &self.token_type)
            .append_pair("expires_in", &self.expires_in_secs.to_string())
            .append_pair("scope", &self.scope)
            .append_pair("state", &self.state);

        let mut url = redirect_uri.clone();
        url.set_fragment(Some(&serializer.finish()));
        url
    }
}
