//! Authentication and token configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::parse_setting;

/// Signer key used when none is configured. Refused in production.
pub const DEVELOPMENT_SIGNER_KEY: &str =
    "development-signer-key-please-change-in-production-0123456789abcdef";

/// Longest accepted token lifetime, ten years
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// JWT signing configuration
///
/// `signer_key` is never serialized and is redacted from `Debug` output.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret used to sign and verify tokens
    #[serde(skip_serializing, default)]
    pub signer_key: String,

    /// Token lifetime in hours
    pub expiration_hours: i64,

    /// `iss` claim written into every token
    pub issuer: String,

    /// `aud` claim written into every token and required on verification
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signer_key: String::from(DEVELOPMENT_SIGNER_KEY),
            expiration_hours: 1,
            issuer: String::from("authgate"),
            audience: String::from("authgate-api"),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("signer_key", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(signer_key: impl Into<String>) -> Self {
        Self {
            signer_key: signer_key.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in hours
    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = hours;
        self
    }

    /// Check if using the built-in development key
    pub fn is_using_default_key(&self) -> bool {
        self.signer_key == DEVELOPMENT_SIGNER_KEY
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Upper bound for a single user-store or revocation-store call
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// How often expired revocation entries are purged
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    /// Whether the background purge task runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            store_timeout_ms: default_store_timeout_ms(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            cleanup_enabled: default_cleanup_enabled(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// Unset variables take their defaults; values that do not parse are errors.
    pub fn from_env() -> Result<Self, String> {
        let defaults = JwtConfig::default();
        let signer_key = std::env::var("JWT_SIGNER_KEY").unwrap_or(defaults.signer_key);
        let expiration_hours = parse_setting(
            "JWT_EXPIRATION_HOURS",
            std::env::var("JWT_EXPIRATION_HOURS").ok(),
            defaults.expiration_hours,
        )?;
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience);

        let bcrypt_cost = parse_setting(
            "BCRYPT_COST",
            std::env::var("BCRYPT_COST").ok(),
            PasswordConfig::default().bcrypt_cost,
        )?;
        let store_timeout_ms = parse_setting(
            "STORE_TIMEOUT_MS",
            std::env::var("STORE_TIMEOUT_MS").ok(),
            default_store_timeout_ms(),
        )?;
        let cleanup_interval_secs = parse_setting(
            "REVOCATION_CLEANUP_INTERVAL_SECS",
            std::env::var("REVOCATION_CLEANUP_INTERVAL_SECS").ok(),
            default_cleanup_interval_secs(),
        )?;

        Ok(Self {
            jwt: JwtConfig {
                signer_key,
                expiration_hours,
                issuer,
                audience,
            },
            password: PasswordConfig { bcrypt_cost },
            store_timeout_ms,
            cleanup_interval_secs,
            cleanup_enabled: cleanup_interval_secs > 0,
        })
    }

    /// Reject configurations the token service cannot run with
    pub fn validate(&self, environment: Environment) -> Result<(), String> {
        if self.jwt.signer_key.is_empty() {
            return Err("JWT signer key must not be empty".to_string());
        }
        if self.jwt.expiration_hours <= 0 || self.jwt.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(format!(
                "JWT expiration must be between 1 and {} hours, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            ));
        }
        if self.jwt.audience.is_empty() || self.jwt.issuer.is_empty() {
            return Err("JWT issuer and audience must not be empty".to_string());
        }
        if environment.is_production() && self.jwt.is_using_default_key() {
            return Err("JWT_SIGNER_KEY must be set in production".to_string());
        }
        Ok(())
    }
}

fn default_store_timeout_ms() -> u64 {
    2000
}

fn default_cleanup_interval_secs() -> u64 {
    3600
}

fn default_cleanup_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_hours, 1);
        assert_eq!(config.audience, "authgate-api");
        assert!(config.is_using_default_key());
    }

    #[test]
    fn test_debug_output_redacts_signer_key() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_signer_key_is_not_serialized() {
        let config = JwtConfig::new("super-secret-value");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret-value"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AuthConfig::default();
        assert!(config.validate(Environment::Development).is_ok());
        assert!(config.validate(Environment::Production).is_err());

        config.jwt.expiration_hours = 0;
        assert!(config.validate(Environment::Development).is_err());

        config.jwt.expiration_hours = MAX_EXPIRATION_HOURS + 1;
        assert!(config.validate(Environment::Development).is_err());

        config.jwt.expiration_hours = MAX_EXPIRATION_HOURS;
        assert!(config.validate(Environment::Development).is_ok());

        config.jwt = JwtConfig::new("");
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_validate_accepts_custom_key_in_production() {
        let config = AuthConfig {
            jwt: JwtConfig::new("a-real-production-secret").with_expiration_hours(2),
            ..Default::default()
        };
        assert!(config.validate(Environment::Production).is_ok());
    }
}
