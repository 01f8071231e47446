//! Grant codes and bearer tokens.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::scope::Scope;

/// Default access token lifetime when the provider does not override it.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(600);

/// The two token kinds the provider can mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived bearer credential presented to resource servers.
    Access,
    /// Longer-lived credential exchangeable for a fresh access token.
    Refresh,
}

impl TokenKind {
    /// Returns the string representation of the token kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short-lived, single-use authorization grant code.
///
/// Minted by the provider at the consent-submission step and redeemed once
/// at the token endpoint. The (client, redirect URI) binding is captured at
/// creation and re-checked byte-for-byte at redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantCode {
    /// Opaque code value delivered to the client via the redirect.
    pub code: String,

    /// Client the grant was issued to.
    pub client_id: String,

    /// Redirect URI used in the originating authorization request.
    pub redirect_uri: Url,

    /// Scopes the resource owner consented to.
    pub scopes: Vec<Scope>,
}

/// An opaque bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Opaque token value.
    pub value: String,

    /// Token type as it appears on the wire. Always `"bearer"` (RFC 6750).
    pub token_type: String,

    /// Remaining lifetime at issuance.
    pub expires_in: Duration,

    /// Scope set the token carries.
    pub scopes: Vec<Scope>,
}

impl Token {
    /// Creates a bearer token.
    #[must_use]
    pub fn bearer(value: impl Into<String>, expires_in: Duration, scopes: Vec<Scope>) -> Self {
        Self {
            value: value.into(),
            token_type: "bearer".to_string(),
            expires_in,
            scopes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_as_str() {
        assert_eq!(TokenKind::Access.as_str(), "access");
        assert_eq!(TokenKind::Refresh.as_str(), "refresh");
        assert_eq!(TokenKind::Access.to_string(), "access");
    }

    #[test]
    fn test_bearer_constructor() {
        let token = Token::bearer("abc", DEFAULT_ACCESS_TOKEN_TTL, vec![]);
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in.as_secs(), 600);
    }
}
