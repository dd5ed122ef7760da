//! Shared configuration and response types for the Authgate server
//!
//! - Configuration types loaded from the environment
//! - Error response structure and error codes
//! - API response envelope

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, PasswordConfig,
    RevocationStoreKind, ServerConfig, StorageConfig, UserStoreKind,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
