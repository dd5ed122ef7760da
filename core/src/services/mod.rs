//! Business services layer

pub mod auth;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, BcryptPasswordHasher, PasswordHasher};
pub use token::{
    ClaimsBuilder, CleanupResult, RevocationCleanupConfig, RevocationCleanupService, TokenService,
    TokenServiceConfig,
};
