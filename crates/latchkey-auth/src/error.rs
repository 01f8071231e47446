//! Error vocabulary for the authorization server core.
//!
//! Two layers live here:
//!
//! - [`AuthError`], the internal error type returned by provider calls and
//!   flow orchestration. Carries enough context for logging, never any
//!   token or secret material.
//! - [`AuthzError`], the RFC 6749 section 4.1.2.1 wire value: a
//!   machine-readable code from the closed [`ErrorCode`] set, a human
//!   description, the echoed `state`, and an optional reference URI.
//!
//! Whether an [`AuthzError`] is rendered into the consent form, encoded
//! into a redirect URI, or serialized as a JSON body is a property of the
//! error site, not of the error kind; the constructors here only build the
//! value, delivery is decided by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Type alias for results of authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Internal errors
// =============================================================================

/// Errors that can occur during authorization and token operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Client authentication failed or the client is not registered.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The authorization grant or refresh token is invalid, expired,
    /// revoked, or was issued to another client.
    #[error("Invalid grant: {message}")]
    InvalidGrant {
        /// Description of why the grant is invalid.
        message: String,
    },

    /// The requested scope is invalid, unknown, malformed, or exceeds the
    /// scope originally granted.
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Description of why the scope is invalid.
        message: String,
    },

    /// The request is missing a required parameter or is otherwise malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The resource owner or the authorization server denied the request.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// Description of why access was denied.
        message: String,
    },

    /// The authorization server does not support the requested response type.
    #[error("Unsupported response type: {response_type}")]
    UnsupportedResponseType {
        /// The unsupported response type.
        response_type: String,
    },

    /// The authorization server does not support the requested grant type.
    #[error("Unsupported grant type: {grant_type}")]
    UnsupportedGrantType {
        /// The unsupported grant type.
        grant_type: String,
    },

    /// An error occurred while storing or retrieving authorization data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The server is temporarily unable to handle the request.
    #[error("Temporarily unavailable: {message}")]
    TemporarilyUnavailable {
        /// Description of the condition.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidGrant` error.
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::InvalidGrant {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `AccessDenied` error.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedResponseType` error.
    #[must_use]
    pub fn unsupported_response_type(response_type: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            response_type: response_type.into(),
        }
    }

    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(grant_type: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `TemporarilyUnavailable` error.
    #[must_use]
    pub fn temporarily_unavailable(message: impl Into<String>) -> Self {
        Self::TemporarilyUnavailable {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::Internal { .. } | Self::TemporarilyUnavailable { .. }
        )
    }

    /// Returns the OAuth 2.0 wire code for this error.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidClient { .. } => ErrorCode::InvalidClient,
            Self::InvalidGrant { .. } => ErrorCode::InvalidGrant,
            Self::InvalidScope { .. } => ErrorCode::InvalidScope,
            Self::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            Self::AccessDenied { .. } => ErrorCode::AccessDenied,
            Self::UnsupportedResponseType { .. } => ErrorCode::UnsupportedResponseType,
            Self::UnsupportedGrantType { .. } => ErrorCode::UnsupportedGrantType,
            Self::Storage { .. } | Self::Internal { .. } => ErrorCode::ServerError,
            Self::TemporarilyUnavailable { .. } => ErrorCode::TemporarilyUnavailable,
        }
    }
}

// =============================================================================
// Wire error codes
// =============================================================================

/// OAuth 2.0 error codes, RFC 6749 sections 4.1.2.1 and 5.2.
///
/// This is a closed set; every error leaving the server carries exactly one
/// of these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is missing a required parameter, includes an invalid
    /// parameter value, or is otherwise malformed.
    InvalidRequest,

    /// The client is not authorized to request an authorization using
    /// this method.
    UnauthorizedClient,

    /// The resource owner or authorization server denied the request.
    AccessDenied,

    /// The authorization server does not support obtaining an
    /// authorization using this method.
    UnsupportedResponseType,

    /// The requested scope is invalid, unknown, or malformed.
    InvalidScope,

    /// The authorization server encountered an unexpected condition.
    ServerError,

    /// The authorization server is currently unable to handle the request.
    TemporarilyUnavailable,

    /// Client authentication failed (token endpoint).
    InvalidClient,

    /// The authorization grant or refresh token is invalid, expired,
    /// revoked, or was issued to another client (token endpoint).
    InvalidGrant,

    /// The grant type is not supported by the authorization server
    /// (token endpoint).
    UnsupportedGrantType,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::AccessDenied => "access_denied",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::InvalidScope => "invalid_scope",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnsupportedGrantType => "unsupported_grant_type",
        }
    }

    /// Returns the HTTP status code used when this error is delivered as a
    /// JSON body (token and revocation endpoints).
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidClient => 401,
            Self::ServerError => 500,
            Self::TemporarilyUnavailable => 503,
            _ => 400,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Wire error value
// =============================================================================

/// Description sent when a grant code fails redemption for any reason.
///
/// A single message for replayed, expired, revoked, and mis-bound codes so
/// the response does not reveal which check failed.
pub const GRANT_REVOKED_DESC: &str = "Grant code was revoked, expired or already used.";

const CLIENT_ID_MISSING_DESC: &str = "client_id parameter is required by this authorization server.";
const CLIENT_NOT_FOUND_DESC: &str =
    "3rd-party client app is not registered with this authorization server.";
const REDIRECT_URI_INVALID_DESC: &str = "3rd-party client app provided an invalid redirect_uri. \
     It does not comply with http://tools.ietf.org/html/rfc3986#section-4.3 or does not use HTTPS";
const REDIRECT_URI_MISMATCH_DESC: &str = "3rd-party client app provided a redirect_uri that does \
     not match the URI registered for this client in our database.";
const STATE_REQUIRED_DESC: &str = "state parameter is required by this authorization server.";
const SCOPE_REQUIRED_DESC: &str = "scope parameter is required by this authorization server.";
const UNSUPPORTED_RESPONSE_TYPE_DESC: &str =
    "response_type must be set to either \"code\" or \"token\".";

/// RFC 6749 section 4.1.2.1 compliant error value.
///
/// Serializes to the `error`, `error_description`, `error_uri`, and `state`
/// keys, whether that lands in a query string, a URI fragment, or a JSON
/// body. Never carries sensitive data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzError {
    /// Machine-readable error code.
    pub error: ErrorCode,

    /// Human-readable description. May be verbose; the `error` code is the
    /// contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,

    /// Reference URI with further information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,

    /// Echo of the client-submitted `state`, byte-for-byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl AuthzError {
    /// Creates an error with a description and no state echo.
    #[must_use]
    pub fn new(error: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            error,
            error_description: Some(description.into()),
            error_uri: None,
            state: None,
        }
    }

    /// Attaches the `state` echo.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// The `client_id` parameter was absent.
    #[must_use]
    pub fn client_id_missing() -> Self {
        Self::new(ErrorCode::InvalidRequest, CLIENT_ID_MISSING_DESC)
    }

    /// The client is not present in the provider's registry.
    #[must_use]
    pub fn client_not_found() -> Self {
        Self::new(ErrorCode::InvalidRequest, CLIENT_NOT_FOUND_DESC)
    }

    /// The `redirect_uri` did not parse or does not use HTTPS.
    #[must_use]
    pub fn redirect_uri_invalid() -> Self {
        Self::new(ErrorCode::AccessDenied, REDIRECT_URI_INVALID_DESC)
    }

    /// The `redirect_uri` does not byte-equal the registered one.
    #[must_use]
    pub fn redirect_uri_mismatch() -> Self {
        Self::new(ErrorCode::AccessDenied, REDIRECT_URI_MISMATCH_DESC)
    }

    /// The `state` parameter was absent.
    #[must_use]
    pub fn state_required() -> Self {
        Self::new(ErrorCode::InvalidRequest, STATE_REQUIRED_DESC)
    }

    /// The `scope` parameter was absent.
    #[must_use]
    pub fn scope_required(state: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, SCOPE_REQUIRED_DESC).with_state(state)
    }

    /// The `response_type` is not `code` or `token`.
    #[must_use]
    pub fn unsupported_response_type(state: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnsupportedResponseType,
            UNSUPPORTED_RESPONSE_TYPE_DESC,
        )
        .with_state(state)
    }

    /// A grant code failed redemption.
    #[must_use]
    pub fn grant_revoked() -> Self {
        Self::new(ErrorCode::InvalidGrant, GRANT_REVOKED_DESC)
    }

    /// Wraps an underlying failure as a `server_error`.
    #[must_use]
    pub fn server_error(state: Option<String>, cause: &AuthError) -> Self {
        Self {
            error: ErrorCode::ServerError,
            error_description: Some(cause.to_string()),
            error_uri: None,
            state,
        }
    }

    /// Projects an internal error onto the wire vocabulary, keeping its
    /// code mapping and message.
    #[must_use]
    pub fn from_auth_error(err: &AuthError) -> Self {
        Self {
            error: err.error_code(),
            error_description: Some(err.to_string()),
            error_uri: None,
            state: None,
        }
    }

    /// Encodes this error into the query component of `redirect_uri`,
    /// the delivery channel for authorization-code flow failures.
    #[must_use]
    pub fn encoded_in_query(&self, redirect_uri: &Url) -> Url {
        let mut url = redirect_uri.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("error", self.error.as_str());
            if let Some(ref desc) = self.error_description {
                pairs.append_pair("error_description", desc);
            }
            if let Some(ref uri) = self.error_uri {
                pairs.append_pair("error_uri", uri);
            }
            if let Some(ref state) = self.state {
                pairs.append_pair("state", state);
            }
        }
        url
    }

    /// Encodes this error into the fragment component of `redirect_uri`,
    /// the delivery channel for implicit flow failures. The fragment keeps
    /// error parameters out of Referer headers and server logs, matching
    /// the implicit success channel.
    #[must_use]
    pub fn encoded_in_fragment(&self, redirect_uri: &Url) -> Url {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("error", self.error.as_str());
        if let Some(ref desc) = self.error_description {
            serializer.append_pair("error_description", desc);
        }
        if let Some(ref uri) = self.error_uri {
            serializer.append_pair("error_uri", uri);
        }
        if let Some(ref state) = self.state {
            serializer.append_pair("state", state);
        }

        let mut url = redirect_uri.clone();
        url.set_fragment(Some(&serializer.finish()));
        url
    }
}
