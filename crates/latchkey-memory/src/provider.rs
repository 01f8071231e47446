//! The in-memory provider implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use time::OffsetDateTime;

use latchkey_auth::error::GRANT_REVOKED_DESC;
use latchkey_auth::types::scope;
use latchkey_auth::types::token::DEFAULT_ACCESS_TOKEN_TTL;
use latchkey_auth::{AuthError, AuthResult, Client, GrantCode, Provider, Scope, Token, TokenKind};

use crate::DEFAULT_AUTHZ_FORM;

/// Default grant code lifetime, per the OAuth 2.0 recommendation of
/// keeping codes short-lived.
const DEFAULT_CODE_TTL: Duration = Duration::from_secs(600);

/// Default refresh token lifetime.
const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

const DEFAULT_LOGIN_ENDPOINT: &str = "https://accounts.example.com/login";

const REFRESH_REVOKED_DESC: &str = "Refresh token was revoked, expired or already used.";
const SCOPE_UPGRADE_DESC: &str = "Requested scope exceeds the scope granted by the resource owner.";

/// Lifecycle of a grant code. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStatus {
    /// Minted, not yet redeemed.
    Issued,
    /// Redeemed exactly once. Terminal for redemption, but the grant
    /// keeps its derived-token list so cascade revocation stays possible.
    Redeemed,
    /// Revoked, along with every derived token.
    Revoked,
    /// Expired before redemption.
    Expired,
}

/// Lifecycle of an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Usable.
    Active,
    /// Explicitly revoked.
    Revoked,
}

#[derive(Debug, Clone)]
struct ClientRecord {
    client: Client,
    secret: String,
}

#[derive(Debug, Clone)]
struct GrantRecord {
    grant: GrantCode,
    status: GrantStatus,
    expires_at: OffsetDateTime,
    /// Values of every token derived from this grant.
    derived: Vec<String>,
}

#[derive(Debug, Clone)]
struct TokenRecord {
    kind: TokenKind,
    status: TokenStatus,
    scopes: Vec<Scope>,
    client_id: String,
    /// Originating grant code; `None` for implicit-flow root tokens.
    grant: Option<String>,
    expires_at: OffsetDateTime,
}

impl TokenRecord {
    fn is_active(&self) -> bool {
        self.status == TokenStatus::Active && self.expires_at > OffsetDateTime::now_utc()
    }
}

/// An in-memory provider. Cheap to construct, safe to share behind an
/// `Arc`, and serializes grant redemption so exactly one attempt per code
/// can succeed.
pub struct InMemoryProvider {
    clients: RwLock<HashMap<String, ClientRecord>>,
    catalogue: RwLock<Vec<Scope>>,
    // Lock order: grants before tokens, always.
    grants: Mutex<HashMap<String, GrantRecord>>,
    tokens: Mutex<HashMap<String, TokenRecord>>,
    authenticated: AtomicBool,
    login_endpoint: String,
    form_template: String,
    code_ttl: Duration,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl InMemoryProvider {
    /// Starts building a provider.
    #[must_use]
    pub fn builder() -> InMemoryProviderBuilder {
        InMemoryProviderBuilder::default()
    }

    /// Flips the simulated resource-owner session. Handy in tests that
    /// exercise the login redirect.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::Relaxed);
    }

    /// Reports whether a token value is currently usable. Test
    /// introspection; not part of the provider capability.
    #[must_use]
    pub fn is_token_active(&self, value: &str) -> bool {
        self.tokens
            .lock()
            .map(|tokens| tokens.get(value).is_some_and(TokenRecord::is_active))
            .unwrap_or(false)
    }

    /// Returns the lifecycle state of a grant code. Test introspection.
    #[must_use]
    pub fn grant_status(&self, code: &str) -> Option<GrantStatus> {
        self.grants
            .lock()
            .ok()
            .and_then(|grants| grants.get(code).map(|g| g.status))
    }

    fn grants(&self) -> AuthResult<MutexGuard<'_, HashMap<String, GrantRecord>>> {
        self.grants
            .lock()
            .map_err(|_| AuthError::storage("grant table lock poisoned"))
    }

    fn tokens(&self) -> AuthResult<MutexGuard<'_, HashMap<String, TokenRecord>>> {
        self.tokens
            .lock()
            .map_err(|_| AuthError::storage("token table lock poisoned"))
    }

    /// Revokes every token in `derived`. Caller holds the grant lock.
    fn cascade_revoke(
        tokens: &mut HashMap<String, TokenRecord>,
        derived: &[String],
    ) {
        for value in derived {
            if let Some(record) = tokens.get_mut(value) {
                record.status = TokenStatus::Revoked;
            }
        }
    }

    /// Mints and records a token, appending it to its grant's derived
    /// list when one is given.
    fn mint_token(
        &self,
        kind: TokenKind,
        client_id: &str,
        scopes: Vec<Scope>,
        grant: Option<&str>,
    ) -> AuthResult<Token> {
        let value = opaque_value();
        let ttl = match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        };

        let mut grants = self.grants()?;
        let mut tokens = self.tokens()?;

        if let Some(code) = grant {
            let record = grants
                .get_mut(code)
                .ok_or_else(|| AuthError::invalid_grant(GRANT_REVOKED_DESC))?;
            record.derived.push(value.clone());
        }

        tokens.insert(
            value.clone(),
            TokenRecord {
                kind,
                status: TokenStatus::Active,
                scopes: scopes.clone(),
                client_id: client_id.to_string(),
                grant: grant.map(str::to_string),
                expires_at: OffsetDateTime::now_utc() + ttl,
            },
        );

        Ok(Token::bearer(value, ttl, scopes))
    }
}

#[async_trait]
impl Provider for InMemoryProvider {
    async fn client_info(&self, client_id: &str) -> AuthResult<Option<Client>> {
        let clients = self
            .clients
            .read()
            .map_err(|_| AuthError::storage("client registry lock poisoned"))?;
        Ok(clients.get(client_id).map(|r| r.client.clone()))
    }

    async fn verify_client_secret(&self, client_id: &str, secret: &str) -> AuthResult<bool> {
        let clients = self
            .clients
            .read()
            .map_err(|_| AuthError::storage("client registry lock poisoned"))?;
        Ok(clients
            .get(client_id)
            .is_some_and(|r| r.secret == secret))
    }

    async fn scopes_info(&self, raw: &str) -> AuthResult<Vec<Scope>> {
        let names = scope::split_names(raw)
            .map_err(|e| AuthError::invalid_scope(e.to_string()))?;

        let catalogue = self
            .catalogue
            .read()
            .map_err(|_| AuthError::storage("scope catalogue lock poisoned"))?;

        // Unknown names are dropped, not rejected.
        Ok(names
            .into_iter()
            .filter_map(|name| catalogue.iter().find(|s| s.id == name).cloned())
            .collect())
    }

    async fn gen_authz_code(&self, client: &Client, scopes: &[Scope]) -> AuthResult<GrantCode> {
        let grant = GrantCode {
            code: opaque_value(),
            client_id: client.id.clone(),
            redirect_uri: client.redirect_uri.clone(),
            scopes: scopes.to_vec(),
        };

        let mut grants = self.grants()?;
        grants.insert(
            grant.code.clone(),
            GrantRecord {
                grant: grant.clone(),
                status: GrantStatus::Issued,
                expires_at: OffsetDateTime::now_utc() + self.code_ttl,
                derived: Vec::new(),
            },
        );

        Ok(grant)
    }

    async fn redeem_authz_code(&self, code: &str) -> AuthResult<GrantCode> {
        // The single mutex over the grant table is what serializes
        // concurrent redemption: the status check and the transition
        // happen under one critical section, so a second attempt always
        // observes REDEEMED and triggers the cascade.
        let mut grants = self.grants()?;
        let Some(record) = grants.get_mut(code) else {
            return Err(AuthError::invalid_grant(GRANT_REVOKED_DESC));
        };

        match record.status {
            GrantStatus::Issued => {
                if record.expires_at <= OffsetDateTime::now_utc() {
                    record.status = GrantStatus::Expired;
                    return Err(AuthError::invalid_grant(GRANT_REVOKED_DESC));
                }
                record.status = GrantStatus::Redeemed;
                Ok(record.grant.clone())
            }
            GrantStatus::Redeemed => {
                // Replay: the grant and everything ever derived from it
                // are burned.
                record.status = GrantStatus::Revoked;
                let derived = record.derived.clone();
                let mut tokens = self.tokens()?;
                Self::cascade_revoke(&mut tokens, &derived);
                tracing::warn!(
                    client_id = %record.grant.client_id,
                    revoked_tokens = derived.len(),
                    "grant code replayed; grant and derived tokens revoked"
                );
                Err(AuthError::invalid_grant(GRANT_REVOKED_DESC))
            }
            GrantStatus::Revoked | GrantStatus::Expired => {
                Err(AuthError::invalid_grant(GRANT_REVOKED_DESC))
            }
        }
    }

    async fn revoke_authz_code(&self, code: &str) -> AuthResult<()> {
        let mut grants = self.grants()?;
        if let Some(record) = grants.get_mut(code) {
            record.status = GrantStatus::Revoked;
            let derived = record.derived.clone();
            let mut tokens = self.tokens()?;
            Self::cascade_revoke(&mut tokens, &derived);
            tracing::debug!(
                client_id = %record.grant.client_id,
                revoked_tokens = derived.len(),
                "grant revoked with cascade"
            );
        }
        Ok(())
    }

    async fn gen_token(
        &self,
        kind: TokenKind,
        client: &Client,
        scopes: &[Scope],
        grant: Option<&str>,
    ) -> AuthResult<Token> {
        self.mint_token(kind, &client.id, scopes.to_vec(), grant)
    }

    async fn refresh_token(&self, refresh_token: &str, scopes: &[Scope]) -> AuthResult<Token> {
        let (client_id, granted, grant) = {
            let tokens = self.tokens()?;
            let record = tokens
                .get(refresh_token)
                .filter(|r| r.kind == TokenKind::Refresh && r.is_active())
                .ok_or_else(|| AuthError::invalid_grant(REFRESH_REVOKED_DESC))?;
            (
                record.client_id.clone(),
                record.scopes.clone(),
                record.grant.clone(),
            )
        };

        // An empty request inherits the refresh token's scope; anything
        // else must be a subset of it.
        let requested = if scopes.is_empty() {
            granted.clone()
        } else {
            for s in scopes {
                if !granted.iter().any(|g| g.id == s.id) {
                    return Err(AuthError::invalid_scope(SCOPE_UPGRADE_DESC));
                }
            }
            scopes.to_vec()
        };

        self.mint_token(TokenKind::Access, &client_id, requested, grant.as_deref())
    }

    async fn revoke_token(&self, token: &str) -> AuthResult<()> {
        let mut tokens = self.tokens()?;
        if let Some(record) = tokens.get_mut(token) {
            record.status = TokenStatus::Revoked;
        }
        // Unknown tokens are not an error: revocation is idempotent and
        // must not disclose token existence.
        Ok(())
    }

    async fn is_user_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Relaxed)
    }

    fn login_url(&self, referer: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(referer.as_bytes()).collect();
        format!("{}?referer={}", self.login_endpoint, encoded)
    }

    fn authz_form(&self) -> String {
        self.form_template.clone()
    }
}

/// A 256-bit random value, base64url-encoded without padding.
fn opaque_value() -> String {
    let mut bytes = [0u8; 32];
    rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Builder for [`InMemoryProvider`].
pub struct InMemoryProviderBuilder {
    clients: HashMap<String, ClientRecord>,
    catalogue: Vec<Scope>,
    authenticated: bool,
    login_endpoint: String,
    form_template: String,
    code_ttl: Duration,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl Default for InMemoryProviderBuilder {
    fn default() -> Self {
        Self {
            clients: HashMap::new(),
            catalogue: Vec::new(),
            authenticated: false,
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            form_template: DEFAULT_AUTHZ_FORM.to_string(),
            code_ttl: DEFAULT_CODE_TTL,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }
}

impl InMemoryProviderBuilder {
    /// Registers a client with its secret.
    #[must_use]
    pub fn client(mut self, client: Client, secret: impl Into<String>) -> Self {
        self.clients.insert(
            client.id.clone(),
            ClientRecord {
                client,
                secret: secret.into(),
            },
        );
        self
    }

    /// Adds a scope to the catalogue.
    #[must_use]
    pub fn scope(mut self, id: impl Into<String>, description: impl Into<String>) -> Self {
        self.catalogue.push(Scope::new(id, description));
        self
    }

    /// Sets the initial resource-owner session state.
    #[must_use]
    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Sets the login endpoint returned by `login_url`.
    #[must_use]
    pub fn login_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.login_endpoint = endpoint.into();
        self
    }

    /// Overrides the consent-form template handed to the server.
    #[must_use]
    pub fn authz_form(mut self, template: impl Into<String>) -> Self {
        self.form_template = template.into();
        self
    }

    /// Overrides the grant code lifetime.
    #[must_use]
    pub fn code_ttl(mut self, ttl: Duration) -> Self {
        self.code_ttl = ttl;
        self
    }

    /// Overrides the access token lifetime.
    #[must_use]
    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Overrides the refresh token lifetime.
    #[must_use]
    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    /// Builds the provider.
    #[must_use]
    pub fn build(self) -> InMemoryProvider {
        InMemoryProvider {
            clients: RwLock::new(self.clients),
            catalogue: RwLock::new(self.catalogue),
            grants: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
            authenticated: AtomicBool::new(self.authenticated),
            login_endpoint: self.login_endpoint,
            form_template: self.form_template,
            code_ttl: self.code_ttl,
            access_token_ttl: self.access_token_ttl,
            refresh_token_ttl: self.refresh_token_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;

    fn test_client() -> Client {
        Client {
            id: "test_client_id".to_string(),
            name: "Test Client".to_string(),
            description: None,
            profile_img_url: None,
            homepage_url: None,
            redirect_uri: Url::parse("https://example.com/cb").unwrap(),
        }
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::builder()
            .client(test_client(), "test_secret")
            .scope("read", "Read access")
            .scope("write", "Write access")
            .scope("identity", "Know who you are")
            .authenticated(true)
            .build()
    }

    #[tokio::test]
    async fn test_client_lookup() {
        let p = provider();
        let client = p.client_info("test_client_id").await.unwrap();
        assert_eq!(client.unwrap().name, "Test Client");
        assert!(p.client_info("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_secret_verification() {
        let p = provider();
        assert!(p.verify_client_secret("test_client_id", "test_secret").await.unwrap());
        assert!(!p.verify_client_secret("test_client_id", "wrong").await.unwrap());
        assert!(!p.verify_client_secret("nope", "test_secret").await.unwrap());
    }

    #[tokio::test]
    async fn test_scopes_info_drops_unknown_and_folds_duplicates() {
        let p = provider();
        let scopes = p.scopes_info("read bogus write read").await.unwrap();
        let ids: Vec<_> = scopes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["read", "write"]);
    }

    #[tokio::test]
    async fn test_scopes_info_rejects_malformed() {
        let p = provider();
        let err = p.scopes_info("read wr\u{1}ite").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidScope { .. }));
    }

    #[tokio::test]
    async fn test_grant_one_shot() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read write").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        assert_eq!(p.grant_status(&grant.code), Some(GrantStatus::Issued));

        let redeemed = p.redeem_authz_code(&grant.code).await.unwrap();
        assert_eq!(redeemed.client_id, "test_client_id");
        assert_eq!(p.grant_status(&grant.code), Some(GrantStatus::Redeemed));

        let err = p.redeem_authz_code(&grant.code).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
        assert_eq!(err.to_string(), format!("Invalid grant: {GRANT_REVOKED_DESC}"));
        assert_eq!(p.grant_status(&grant.code), Some(GrantStatus::Revoked));
    }

    #[tokio::test]
    async fn test_replay_cascades_to_derived_tokens() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        p.redeem_authz_code(&grant.code).await.unwrap();

        let access = p
            .gen_token(TokenKind::Access, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();
        let refresh = p
            .gen_token(TokenKind::Refresh, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();
        assert!(p.is_token_active(&access.value));
        assert!(p.is_token_active(&refresh.value));

        p.redeem_authz_code(&grant.code).await.unwrap_err();

        assert!(!p.is_token_active(&access.value));
        assert!(!p.is_token_active(&refresh.value));
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let p = InMemoryProvider::builder()
            .client(test_client(), "s")
            .scope("read", "Read access")
            .code_ttl(Duration::ZERO)
            .build();
        let scopes = p.scopes_info("read").await.unwrap();

        let grant = p.gen_authz_code(&test_client(), &scopes).await.unwrap();
        let err = p.redeem_authz_code(&grant.code).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
        assert_eq!(p.grant_status(&grant.code), Some(GrantStatus::Expired));
    }

    #[tokio::test]
    async fn test_concurrent_redemption_single_winner() {
        let p = Arc::new(provider());
        let scopes = p.scopes_info("read").await.unwrap();
        let grant = p.gen_authz_code(&test_client(), &scopes).await.unwrap();

        let (a, b) = tokio::join!(
            {
                let p = Arc::clone(&p);
                let code = grant.code.clone();
                tokio::spawn(async move { p.redeem_authz_code(&code).await })
            },
            {
                let p = Arc::clone(&p);
                let code = grant.code.clone();
                tokio::spawn(async move { p.redeem_authz_code(&code).await })
            }
        );

        let results = [a.unwrap(), b.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert!(successes <= 1, "two redemptions of one code succeeded");
    }

    #[tokio::test]
    async fn test_refresh_scope_subset() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read write").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        p.redeem_authz_code(&grant.code).await.unwrap();
        let refresh = p
            .gen_token(TokenKind::Refresh, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();

        // Narrowing is fine.
        let narrowed = p.scopes_info("read").await.unwrap();
        let access = p.refresh_token(&refresh.value, &narrowed).await.unwrap();
        let ids: Vec<_> = access.scopes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["read"]);

        // Widening is not.
        let widened = p.scopes_info("read identity").await.unwrap();
        let err = p.refresh_token(&refresh.value, &widened).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidScope { .. }));
    }

    #[tokio::test]
    async fn test_refresh_inherits_scope_when_empty() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read write").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        p.redeem_authz_code(&grant.code).await.unwrap();
        let refresh = p
            .gen_token(TokenKind::Refresh, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();

        let access = p.refresh_token(&refresh.value, &[]).await.unwrap();
        let ids: Vec<_> = access.scopes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["read", "write"]);
    }

    #[tokio::test]
    async fn test_revoked_refresh_token_is_unusable() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        p.redeem_authz_code(&grant.code).await.unwrap();
        let refresh = p
            .gen_token(TokenKind::Refresh, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();

        p.revoke_token(&refresh.value).await.unwrap();
        let err = p.refresh_token(&refresh.value, &[]).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
    }

    #[tokio::test]
    async fn test_revoke_token_is_idempotent() {
        let p = provider();
        p.revoke_token("never-issued").await.unwrap();
        p.revoke_token("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn test_revoke_grant_cascades() {
        let p = provider();
        let client = test_client();
        let scopes = p.scopes_info("read").await.unwrap();

        let grant = p.gen_authz_code(&client, &scopes).await.unwrap();
        p.redeem_authz_code(&grant.code).await.unwrap();
        let access = p
            .gen_token(TokenKind::Access, &client, &scopes, Some(&grant.code))
            .await
            .unwrap();

        p.revoke_authz_code(&grant.code).await.unwrap();
        assert_eq!(p.grant_status(&grant.code), Some(GrantStatus::Revoked));
        assert!(!p.is_token_active(&access.value));

        // Idempotent, including for unknown codes.
        p.revoke_authz_code(&grant.code).await.unwrap();
        p.revoke_authz_code("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn test_implicit_token_has_no_grant() {
        let p = provider();
        let scopes = p.scopes_info("read").await.unwrap();
        let token = p
            .gen_token(TokenKind::Access, &test_client(), &scopes, None)
            .await
            .unwrap();
        assert!(p.is_token_active(&token.value));
        assert_eq!(token.expires_in, DEFAULT_ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_login_url_encodes_referer() {
        let p = provider();
        let url = p.login_url("/oauth2/authzs?client_id=a&state=b");
        assert!(url.starts_with("https://accounts.example.com/login?referer="));
        assert!(url.contains("%2Foauth2%2Fauthzs%3Fclient_id%3Da%26state%3Db"));
    }

    #[test]
    fn test_opaque_values_are_unique_and_urlsafe() {
        let a = opaque_value();
        let b = opaque_value();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
