//! Token service module for signed session tokens
//!
//! This module handles all token-related operations including:
//! - Claim construction and HS512 signing
//! - Ordered verification (structure, signature, expiry, audience, revocation)
//! - Revocation of individual tokens
//! - Background purge of expired revocation entries

mod claims;
mod cleanup;
mod codec;
mod config;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use claims::ClaimsBuilder;
pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use codec::{TokenSigner, TokenVerifier};
pub use config::TokenServiceConfig;
pub use service::TokenService;
