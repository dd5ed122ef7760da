//! Claim set construction

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::domain::entities::token::{Audience, Claims};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

/// Number of random bytes behind every token id
const JTI_BYTES: usize = 16;

/// Builds the claim set for a user at a given instant
///
/// Pure apart from drawing a fresh random `jti`.
#[derive(Debug, Clone)]
pub struct ClaimsBuilder {
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl ClaimsBuilder {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, ttl: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fails when the expiry would fall outside the representable time range
    pub fn build(&self, user: &User, issued_at: DateTime<Utc>) -> Result<Claims, DomainError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(DomainError::Token(TokenError::SigningFailed))?;
        let iat = issued_at.timestamp();

        Ok(Claims {
            sub: user.email.clone(),
            iss: self.issuer.clone(),
            aud: Audience::Single(self.audience.clone()),
            iat,
            exp: expires_at.timestamp(),
            jti: generate_jti(),
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            scope: user.role_codes(),
        })
    }
}

/// 128 random bits, hex encoded
fn generate_jti() -> String {
    let mut bytes = [0u8; JTI_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
