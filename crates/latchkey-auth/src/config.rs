//! Server configuration.
//!
//! A fixed set of enumerated options: every option not set takes a
//! documented default, and the two required inputs (the provider and the
//! consent-form template, supplied to the
//! [`AuthServer`](crate::http::AuthServer) builder) fail at startup, not
//! at request time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::form::FormError;

/// Default authorization endpoint path.
pub const DEFAULT_AUTHZ_ENDPOINT: &str = "/oauth2/authzs";

/// Default token endpoint path.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "/oauth2/tokens";

/// Default revocation endpoint path.
pub const DEFAULT_REVOKE_ENDPOINT: &str = "/oauth2/revoke";

/// Default `Strict-Transport-Security` max-age: one year.
pub const DEFAULT_STS_MAX_AGE: Duration = Duration::from_secs(31_536_000);

/// Authorization server configuration.
///
/// # Example (TOML)
///
/// ```toml
/// authz_endpoint = "/oauth2/authzs"
/// token_endpoint = "/oauth2/tokens"
/// revoke_endpoint = "/oauth2/revoke"
/// sts_max_age = "1year"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Authorization endpoint path. The endpoint used to interact with
    /// the resource owner and obtain an authorization grant
    /// (RFC 6749 section 3.1).
    pub authz_endpoint: String,

    /// Token endpoint path. Used by the client to obtain an access token
    /// by presenting its authorization grant or refresh token
    /// (RFC 6749 section 3.2).
    pub token_endpoint: String,

    /// Revocation endpoint path (RFC 7009).
    pub revoke_endpoint: String,

    /// `Strict-Transport-Security` max-age sent on every HTML response.
    #[serde(with = "humantime_serde")]
    pub sts_max_age: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authz_endpoint: DEFAULT_AUTHZ_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            revoke_endpoint: DEFAULT_REVOKE_ENDPOINT.to_string(),
            sts_max_age: DEFAULT_STS_MAX_AGE,
        }
    }
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No provider implementation was supplied to the builder.
    #[error("a Provider implementation is required")]
    MissingProvider,

    /// No usable consent-form template was supplied by the builder or
    /// the provider.
    #[error("an authorization form template is required")]
    MissingAuthzForm,

    /// The consent-form template failed to compile.
    #[error("invalid authorization form template: {0}")]
    InvalidAuthzForm(#[from] FormError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.authz_endpoint, "/oauth2/authzs");
        assert_eq!(config.token_endpoint, "/oauth2/tokens");
        assert_eq!(config.revoke_endpoint, "/oauth2/revoke");
        assert_eq!(config.sts_max_age, Duration::from_secs(31_536_000));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config =
            serde_json::from_str(r#"{"token_endpoint": "/oauth/token", "sts_max_age": "30days"}"#)
                .unwrap();
        assert_eq!(config.token_endpoint, "/oauth/token");
        assert_eq!(config.authz_endpoint, "/oauth2/authzs");
        assert_eq!(config.sts_max_age, Duration::from_secs(30 * 24 * 3600));
    }
}
