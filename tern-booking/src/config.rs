//! Client configuration

use std::path::PathBuf;

/// Execution environment for the booking client
///
/// Controls the dev-only token re-query branch of the resolver chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Development,
}

impl Environment {
    /// Whether best-effort token re-query is permitted
    pub fn allows_dev_refresh(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

/// Configuration for connecting to the remote-function backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://project.example.co")
    pub base_url: String,

    /// Shared public (anon) key - used as `apikey` header and as the
    /// bearer fallback when no user token resolves
    pub anon_key: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Execution environment
    pub environment: Environment,

    /// Path of the persisted session file, if session storage is enabled
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout: 30,
            environment: Environment::default(),
            session_path: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the execution environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the persisted-session file path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Create a functions client from this configuration
    pub fn build_functions_client(&self) -> super::FunctionsClient {
        super::FunctionsClient::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.co", "anon-key");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.environment, Environment::Production);
        assert!(config.session_path.is_none());
    }

    #[test]
    fn test_dev_refresh_gate() {
        assert!(!Environment::Production.allows_dev_refresh());
        assert!(Environment::Staging.allows_dev_refresh());
        assert!(Environment::Development.allows_dev_refresh());
    }
}
