//! Compact HS512 token encoding and decoding

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::error;

use crate::domain::clock::Clock;
use crate::domain::entities::token::{Claims, Rejection};
use crate::errors::{DomainError, TokenError};

const ALGORITHM: Algorithm = Algorithm::HS512;

fn ensure_secret(secret: &[u8]) -> Result<(), DomainError> {
    if secret.is_empty() {
        return Err(DomainError::Validation {
            message: "Token signer key must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Signs claim sets with the shared secret
pub struct TokenSigner {
    header: Header,
    key: EncodingKey,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Result<Self, DomainError> {
        ensure_secret(secret)?;
        Ok(Self {
            header: Header::new(ALGORITHM),
            key: EncodingKey::from_secret(secret),
        })
    }

    /// Produces `header.payload.mac`; identical claims give identical output
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            TokenError::SigningFailed
        })
    }
}

/// Checks structure, MAC, expiry and audience of a presented token
///
/// Revocation is not checked here; see `TokenService::verify`.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(
        secret: &[u8],
        audience: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        ensure_secret(secret)?;

        // Time and audience are checked below against the injected clock.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation,
            audience: audience.into(),
            clock,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, Rejection> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => Rejection::BadSignature,
                _ => Rejection::Malformed,
            })?
            .claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err(Rejection::Expired);
        }

        if !claims.aud.contains(&self.audience) {
            return Err(Rejection::WrongAudience);
        }

        Ok(claims)
    }
}
