//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

use crate::domain::entities::token::Rejection;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A backing store did not answer in time or failed; retryable
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<Rejection> for DomainError {
    fn from(rejection: Rejection) -> Self {
        DomainError::Token(rejection.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rejection_collapses_to_invalid_token() {
        for rejection in [
            Rejection::Malformed,
            Rejection::BadSignature,
            Rejection::Expired,
            Rejection::WrongAudience,
            Rejection::Revoked,
            Rejection::StoreUnavailable,
        ] {
            let error: DomainError = rejection.into();
            assert_eq!(error, DomainError::Token(TokenError::InvalidToken));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::UserNotFound.to_string(), "User not found");
        let error = DomainError::StoreUnavailable {
            message: "timed out".to_string(),
        };
        assert_eq!(error.to_string(), "Store unavailable: timed out");
    }
}
