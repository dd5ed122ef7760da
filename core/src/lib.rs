//! # Authgate Core
//!
//! Token lifecycle and domain layer for the Authgate service.
//! This crate contains domain entities, the error taxonomy, repository
//! interfaces with in-memory adapters, and the token and authentication
//! services built on top of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
