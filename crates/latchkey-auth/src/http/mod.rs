//! HTTP surface of the authorization server.
//!
//! [`AuthServer`] assembles the configuration, the provider, and the
//! compiled consent form, and turns them into an `axum::Router`:
//!
//! | path (configurable) | method | handler |
//! |---|---|---|
//! | `/oauth2/authzs` | GET | consent form / login redirect |
//! | `/oauth2/authzs` | POST | consent submission, code or implicit token |
//! | `/oauth2/authzs` | DELETE | grant revocation with cascade |
//! | `/oauth2/tokens` | POST | code/refresh exchange |
//! | `/oauth2/revoke` | POST | RFC 7009 token revocation |
//!
//! An unmatched method on a matched path answers `405 Method Not Allowed`.
//!
//! ```ignore
//! use latchkey_auth::{AuthServer, Config};
//!
//! let server = AuthServer::builder()
//!     .config(Config::default())
//!     .provider(provider)
//!     .build()?;
//! let app: axum::Router = server.into_router();
//! ```

pub mod authorize;
pub mod form;
pub(crate) mod respond;
pub mod revoke;
pub mod token;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};

use crate::config::{Config, ConfigError};
use crate::http::form::AuthzForm;
use crate::provider::Provider;

pub use authorize::{authorize_delete, authorize_get, authorize_post};
pub use revoke::revoke_handler;
pub use token::token_handler;

/// Shared request-handling state. The core itself is stateless across
/// requests; everything mutable lives behind the provider.
#[derive(Clone)]
pub struct AppState {
    /// The provider capability.
    pub provider: Arc<dyn Provider>,

    /// Compiled consent form, parsed once at startup.
    pub form: Arc<AuthzForm>,

    /// `Strict-Transport-Security` max-age for HTML responses.
    pub sts_max_age: Duration,
}

/// The assembled authorization server.
pub struct AuthServer {
    config: Config,
    state: AppState,
}

impl AuthServer {
    /// Starts building a server.
    #[must_use]
    pub fn builder() -> AuthServerBuilder {
        AuthServerBuilder::default()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the router serving the three OAuth endpoints.
    #[must_use]
    pub fn into_router(self) -> Router {
        Router::new()
            .route(
                &self.config.authz_endpoint,
                get(authorize::authorize_get)
                    .post(authorize::authorize_post)
                    .delete(authorize::authorize_delete),
            )
            .route(&self.config.token_endpoint, post(token::token_handler))
            .route(&self.config.revoke_endpoint, post(revoke::revoke_handler))
            .with_state(self.state)
    }
}

/// Builder for [`AuthServer`].
///
/// The provider is required. The consent-form template is taken from
/// [`authz_form`](Self::authz_form) when set, otherwise from
/// [`Provider::authz_form`]; an empty or invalid template fails the
/// build.
#[derive(Default)]
pub struct AuthServerBuilder {
    config: Config,
    provider: Option<Arc<dyn Provider>>,
    authz_form: Option<String>,
}

impl AuthServerBuilder {
    /// Sets the endpoint and header configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the provider implementation.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Overrides the consent-form template.
    #[must_use]
    pub fn authz_form(mut self, template: impl Into<String>) -> Self {
        self.authz_form = Some(template.into());
        self
    }

    /// Validates the required options and compiles the consent form.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the provider is missing, when no
    /// template is available, or when the template fails to compile.
    pub fn build(self) -> Result<AuthServer, ConfigError> {
        let provider = self.provider.ok_or(ConfigError::MissingProvider)?;

        let template = match self.authz_form {
            Some(template) => template,
            None => provider.authz_form(),
        };
        if template.trim().is_empty() {
            return Err(ConfigError::MissingAuthzForm);
        }
        let form = AuthzForm::compile(&template)?;

        let sts_max_age = self.config.sts_max_age;
        Ok(AuthServer {
            config: self.config,
            state: AppState {
                provider,
                form: Arc::new(form),
                sts_max_age,
            },
        })
    }
}
