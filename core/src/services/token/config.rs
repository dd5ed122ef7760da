//! Configuration for the token service

use std::time::Duration;

use ag_shared::config::AuthConfig;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub signer_key: String,
    /// Token lifetime in hours
    pub expiration_hours: i64,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim, also the audience every verified token must carry
    pub audience: String,
    /// Upper bound for one revocation store call
    pub store_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            signer_key: config.jwt.signer_key.clone(),
            expiration_hours: config.jwt.expiration_hours,
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("signer_key", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}
