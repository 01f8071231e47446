//! # latchkey-auth
//!
//! An OAuth 2.0 authorization server core implementing:
//!
//! - RFC 6749: the authorization framework (authorization code, implicit,
//!   and refresh token flows)
//! - RFC 6750: bearer tokens
//! - RFC 7009: token revocation
//!
//! The crate is the protocol state machine between three parties: the
//! resource owner (a human in a browser), the third-party client, and a
//! [`Provider`] that owns identity and persistent credential storage.
//! Everything stateful (client registry, scope catalogue, grant codes,
//! tokens, resource-owner sessions) hides behind the provider trait; the
//! core contributes the request validation, the render-vs-redirect
//! decision tree, response URI construction, and the ordering rules that
//! keep tokens away from attacker-controlled redirect targets.
//!
//! ## Modules
//!
//! - [`config`]: endpoint paths and header configuration
//! - [`error`]: the closed RFC error vocabulary, internal and wire level
//! - [`oauth`]: request validation and protocol wire types
//! - [`http`]: axum handlers, the consent form, and server assembly
//! - [`provider`]: the capability trait the core consumes
//! - [`types`]: clients, scopes, grant codes, and tokens
//!
//! ## Assembly
//!
//! ```ignore
//! use std::sync::Arc;
//! use latchkey_auth::{AuthServer, Config};
//!
//! let server = AuthServer::builder()
//!     .config(Config::default())
//!     .provider(Arc::new(provider))
//!     .build()?;
//!
//! axum::serve(listener, server.into_router()).await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod provider;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::{AuthError, AuthResult, AuthzError, ErrorCode};
pub use http::{AuthServer, AuthServerBuilder};
pub use provider::Provider;
pub use types::{Client, GrantCode, Scope, Token, TokenKind};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use latchkey_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::error::{AuthError, AuthResult, AuthzError, ErrorCode};
    pub use crate::http::{AuthServer, AuthServerBuilder};
    pub use crate::provider::Provider;
    pub use crate::types::{Client, GrantCode, Scope, Token, TokenKind};
}
