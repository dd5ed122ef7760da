//! Configuration for the authentication service

use std::time::Duration;

use ag_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Upper bound for one user lookup
    pub store_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}
