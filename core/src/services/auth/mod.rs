//! Authentication service module
//!
//! This module provides the session token lifecycle seen by callers:
//! - Login with email and password
//! - Introspection and request authentication
//! - Logout by revoking the presented token
//! - Refresh with one-time rotation of the presented token

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::AuthService;
