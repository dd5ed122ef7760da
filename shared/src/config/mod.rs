//! Configuration module with business-specific sub-modules
//!
//! - `auth` - signing key, token lifetime, password hashing, store timeouts
//! - `cache` - Redis connection
//! - `database` - MySQL connection pool
//! - `environment` - environment detection
//! - `server` - HTTP bind address
//! - `storage` - which backend serves users and revocations

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{
    AuthConfig, JwtConfig, PasswordConfig, DEVELOPMENT_SIGNER_KEY, MAX_EXPIRATION_HOURS,
};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
pub use storage::{RevocationStoreKind, StorageConfig, UserStoreKind};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Fails when a recognised variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }

    /// Validate the parts of the configuration that would make the service unsafe
    pub fn validate(&self) -> Result<(), String> {
        self.auth.validate(self.environment)
    }
}

/// Parse an optional raw setting, using `default` only when it is unset
pub(crate) fn parse_setting<T: FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, String> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {:?}", name, value)),
    }
}
