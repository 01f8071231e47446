//! The provider capability consumed by the core.
//!
//! The core is deliberately polymorphic over this single trait: storage of
//! grant codes and tokens, the client registry, the scope catalogue, the
//! resource-owner session, and all randomness hide behind it. Inputs and
//! outputs are pure values. Tests inject an in-memory implementation
//! (`latchkey-memory`); production deployments back it with real storage.
//!
//! # Concurrency contract
//!
//! Every async method may block on storage I/O; the core holds no locks
//! across these calls and threads request cancellation through them (a
//! dropped future must abort the in-flight call). The one non-trivial
//! guarantee the core relies on: for a single grant code, the provider
//! must serialize [`redeem_authz_code`](Provider::redeem_authz_code)
//! attempts so that at most one ever succeeds.

use async_trait::async_trait;

use crate::error::AuthResult;
use crate::types::{Client, GrantCode, Scope, Token, TokenKind};

/// Persistent-credential and identity operations the core depends on.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Looks up a registered client by its identifier.
    ///
    /// Returns `Ok(None)` when the client is not registered; `Err` is
    /// reserved for storage failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lookup fails.
    async fn client_info(&self, client_id: &str) -> AuthResult<Option<Client>>;

    /// Verifies a client secret for token-endpoint authentication.
    ///
    /// Returns `Ok(false)` for a wrong secret or a client that has no
    /// secret; the caller maps both to `invalid_client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lookup fails.
    async fn verify_client_secret(&self, client_id: &str, secret: &str) -> AuthResult<bool>;

    /// Parses a raw space-separated scope string against the catalogue.
    ///
    /// Unrecognized scopes are silently dropped and duplicates folded
    /// (RFC 6749 section 3.3). A string violating the section 3.3 grammar
    /// (control characters and the like) is an error.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed scope string or a catalogue
    /// lookup failure.
    async fn scopes_info(&self, scope: &str) -> AuthResult<Vec<Scope>>;

    /// Mints and stores an authorization grant code bound to the client,
    /// its redirect URI, the consented scopes, and the current
    /// resource-owner identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the code cannot be generated or persisted.
    async fn gen_authz_code(&self, client: &Client, scopes: &[Scope]) -> AuthResult<GrantCode>;

    /// Redeems a grant code, atomically marking it consumed.
    ///
    /// Exactly one redemption per code may succeed; the provider must
    /// serialize concurrent attempts. A second presentation must both fail
    /// with `invalid_grant` and revoke the grant together with every token
    /// previously derived from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrant` for an unknown, expired, revoked, or
    /// already-redeemed code.
    async fn redeem_authz_code(&self, code: &str) -> AuthResult<GrantCode>;

    /// Expires a grant code and cascades to every access and refresh token
    /// generated from it. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    async fn revoke_authz_code(&self, code: &str) -> AuthResult<()>;

    /// Mints and stores a token of the given kind.
    ///
    /// `grant` is the originating grant code for tokens issued through the
    /// authorization-code flow; the provider persists the back-reference so
    /// cascade revocation can find the token later. `None` marks a root
    /// token from the implicit flow, which has no grant and is therefore
    /// not refreshable.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be generated or persisted.
    async fn gen_token(
        &self,
        kind: TokenKind,
        client: &Client,
        scopes: &[Scope],
        grant: Option<&str>,
    ) -> AuthResult<Token>;

    /// Issues a fresh access token against a refresh token.
    ///
    /// An empty `scopes` slice requests the refresh token's full scope;
    /// otherwise the requested set must be a subset of it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrant` for an unknown, expired, or revoked refresh
    /// token and `InvalidScope` for a scope upgrade attempt.
    async fn refresh_token(&self, refresh_token: &str, scopes: &[Scope]) -> AuthResult<Token>;

    /// Expires a specific token (access or refresh). Idempotent: revoking
    /// an unknown or already-revoked token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    async fn revoke_token(&self, token: &str) -> AuthResult<()>;

    /// Reports whether the resource owner has a valid session with the
    /// system.
    async fn is_user_authenticated(&self) -> bool;

    /// Returns the login URL to send an unauthenticated resource owner to.
    /// The login system is expected to send the user back to `referer`
    /// afterwards so the authorization flow can complete.
    fn login_url(&self, referer: &str) -> String;

    /// Returns the HTML consent-form template. Consulted once at startup
    /// when no template was supplied through configuration.
    fn authz_form(&self) -> String;
}
