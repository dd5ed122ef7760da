//! Error types for authentication and token operations
//!
//! Messages here are for logs. The HTTP layer chooses what the client sees.

use thiserror::Error;

use crate::domain::entities::token::Rejection;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Any verification failure; the rejection reason is logged, not returned
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signing failed")]
    SigningFailed,
}

impl From<Rejection> for TokenError {
    fn from(_: Rejection) -> Self {
        TokenError::InvalidToken
    }
}
