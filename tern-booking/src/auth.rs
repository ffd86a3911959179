//! Access-token resolution
//!
//! Public widgets must function without a logged-in user, so token lookup
//! is an ordered list of resolver strategies composed first-match-wins:
//! stored session file, then a live query against the auth client, then
//! (outside production) a best-effort re-query. When the whole chain comes
//! up empty the transport proceeds with the shared anon key - that branch
//! is explicit and intentional, not an accident.

use crate::config::{ClientConfig, Environment};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persisted auth session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    /// Unix expiry in seconds; absent means not checked
    pub expires_at: Option<u64>,
}

impl StoredSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();
        let expires_at = parse_jwt_exp(&access_token);
        Self {
            access_token,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => shared::util::now_secs() > expires_at,
            None => false,
        }
    }
}

/// Extract the `exp` claim (Unix seconds) from a JWT without verifying it.
///
/// The token is only used to decide whether the cached session is worth
/// presenting; the server remains the authority on validity.
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    payload.get("exp")?.as_u64()
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, session: &StoredSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    /// Load the persisted session, if present and readable
    pub fn load(&self) -> Option<StoredSession> {
        if !self.path.exists() {
            return None;
        }
        let json = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Seam to the BaaS auth client
///
/// The live session query and the dev-mode re-query both go through this
/// trait, so tests can stub the auth backend.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Current session's access token, if a session exists
    async fn access_token(&self) -> Option<String>;

    /// Best-effort refresh; returns the refreshed access token if one
    /// could be obtained
    async fn refresh_access_token(&self) -> Option<String>;
}

/// One strategy in the token resolution chain
#[async_trait]
pub trait TokenResolver: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self) -> Option<String>;
}

/// Reads the session persisted by a previous login, rejecting expired tokens
pub struct StoredSessionResolver {
    store: SessionStore,
}

impl StoredSessionResolver {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TokenResolver for StoredSessionResolver {
    fn name(&self) -> &'static str {
        "stored_session"
    }

    async fn resolve(&self) -> Option<String> {
        let session = self.store.load()?;
        if session.is_expired() {
            tracing::debug!("Stored session expired, skipping");
            return None;
        }
        Some(session.access_token)
    }
}

/// Queries the auth client for the current live session
pub struct LiveSessionResolver {
    auth: Arc<dyn AuthSession>,
}

impl LiveSessionResolver {
    pub fn new(auth: Arc<dyn AuthSession>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl TokenResolver for LiveSessionResolver {
    fn name(&self) -> &'static str {
        "live_session"
    }

    async fn resolve(&self) -> Option<String> {
        self.auth.access_token().await
    }
}

/// Best-effort re-query, permitted outside production only
pub struct DevRefreshResolver {
    auth: Arc<dyn AuthSession>,
    environment: Environment,
}

impl DevRefreshResolver {
    pub fn new(auth: Arc<dyn AuthSession>, environment: Environment) -> Self {
        Self { auth, environment }
    }
}

#[async_trait]
impl TokenResolver for DevRefreshResolver {
    fn name(&self) -> &'static str {
        "dev_refresh"
    }

    async fn resolve(&self) -> Option<String> {
        if !self.environment.allows_dev_refresh() {
            return None;
        }
        self.auth.refresh_access_token().await
    }
}

/// Ordered resolver chain, first-match-wins
pub struct AccessTokenChain {
    resolvers: Vec<Box<dyn TokenResolver>>,
}

impl AccessTokenChain {
    pub fn new(resolvers: Vec<Box<dyn TokenResolver>>) -> Self {
        Self { resolvers }
    }

    /// Build the standard chain for a configuration: stored session,
    /// live session, dev re-query.
    pub fn for_config(config: &ClientConfig, auth: Option<Arc<dyn AuthSession>>) -> Self {
        let mut resolvers: Vec<Box<dyn TokenResolver>> = Vec::new();

        if let Some(ref path) = config.session_path {
            resolvers.push(Box::new(StoredSessionResolver::new(SessionStore::new(
                path.clone(),
            ))));
        }

        if let Some(auth) = auth {
            resolvers.push(Box::new(LiveSessionResolver::new(auth.clone())));
            resolvers.push(Box::new(DevRefreshResolver::new(auth, config.environment)));
        }

        Self::new(resolvers)
    }

    /// Walk the chain; the first resolver producing a token wins.
    ///
    /// `None` means the caller should proceed unauthenticated with the
    /// shared anon key.
    pub async fn resolve(&self) -> Option<String> {
        for resolver in &self.resolvers {
            if let Some(token) = resolver.resolve().await {
                tracing::debug!(resolver = resolver.name(), "Access token resolved");
                return Some(token);
            }
        }
        tracing::debug!("No access token resolved, proceeding unauthenticated");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // header {"alg":"HS256"} . payload {"exp": 4102444800} . fake sig
    const FUTURE_JWT: &str =
        "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjQxMDI0NDQ4MDB9.c2ln";
    const PAST_JWT: &str = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjE2MDk0NTkyMDB9.c2ln";

    #[test]
    fn test_parse_jwt_exp() {
        assert_eq!(parse_jwt_exp(FUTURE_JWT), Some(4_102_444_800));
        assert_eq!(parse_jwt_exp("not-a-jwt"), None);
        assert_eq!(parse_jwt_exp("a.b"), None);
    }

    #[test]
    fn test_stored_session_expiry() {
        let live = StoredSession::new(FUTURE_JWT);
        assert!(!live.is_expired());

        let stale = StoredSession::new(PAST_JWT);
        assert!(stale.is_expired());

        // Opaque token with no exp claim is kept
        let opaque = StoredSession::new("opaque-token");
        assert!(opaque.expires_at.is_none());
        assert!(!opaque.is_expired());
    }

    #[test]
    fn test_session_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("auth/session.json"));

        assert!(store.load().is_none());

        let session = StoredSession::new(FUTURE_JWT);
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token, FUTURE_JWT);

        store.delete().unwrap();
        assert!(store.load().is_none());
    }

    struct FixedResolver(&'static str, Option<&'static str>);

    #[async_trait]
    impl TokenResolver for FixedResolver {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn resolve(&self) -> Option<String> {
            self.1.map(String::from)
        }
    }

    #[tokio::test]
    async fn test_chain_first_match_wins() {
        let chain = AccessTokenChain::new(vec![
            Box::new(FixedResolver("a", None)),
            Box::new(FixedResolver("b", Some("tok-b"))),
            Box::new(FixedResolver("c", Some("tok-c"))),
        ]);

        assert_eq!(chain.resolve().await.as_deref(), Some("tok-b"));
    }

    #[tokio::test]
    async fn test_chain_exhausted() {
        let chain = AccessTokenChain::new(vec![
            Box::new(FixedResolver("a", None)),
            Box::new(FixedResolver("b", None)),
        ]);

        assert_eq!(chain.resolve().await, None);
    }

    struct StubAuth;

    #[async_trait]
    impl AuthSession for StubAuth {
        async fn access_token(&self) -> Option<String> {
            None
        }

        async fn refresh_access_token(&self) -> Option<String> {
            Some("refreshed".to_string())
        }
    }

    #[tokio::test]
    async fn test_dev_refresh_blocked_in_production() {
        let resolver = DevRefreshResolver::new(Arc::new(StubAuth), Environment::Production);
        assert_eq!(resolver.resolve().await, None);

        let resolver = DevRefreshResolver::new(Arc::new(StubAuth), Environment::Development);
        assert_eq!(resolver.resolve().await.as_deref(), Some("refreshed"));
    }
}
