//! Token entities for signed session tokens.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// `aud` claim, accepted either as a single string or an array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Checks whether `audience` is among the token's audiences
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Multiple(values) => values.iter().any(|value| value == audience),
        }
    }
}

/// Claims structure for the token payload
///
/// Field order is the serialization order, so identical claims always encode
/// to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Audience,

    /// Issued at, seconds since the epoch
    pub iat: i64,

    /// Expiration, seconds since the epoch
    pub exp: i64,

    /// Unique token identifier, the revocation key
    pub jti: String,

    /// User identifier
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    pub username: String,

    pub email: String,

    /// Role codes held by the user
    pub scope: BTreeSet<String>,
}

impl Claims {
    /// Expiry as a timestamp
    ///
    /// An `exp` past the representable range reads as the latest instant, so a
    /// revocation entry derived from it is never purged early.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Checks if the claims have expired at `now`; the expiry instant itself counts
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Checks if the token carries a role code
    pub fn has_scope(&self, code: &str) -> bool {
        self.scope.contains(code)
    }
}

/// Result of signing a fresh claim set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized token
    pub token: String,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

/// A revoked token identifier and the instant after which it no longer matters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            expires_at,
        }
    }

    /// Builds the entry that revokes the token described by `claims`
    pub fn for_claims(claims: &Claims) -> Self {
        Self::new(claims.jti.clone(), claims.expires_at())
    }

    /// Checks whether the entry can be reaped at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Why a token was refused
///
/// Reasons are for server-side logs only. Callers see a single "invalid" verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("malformed token")]
    Malformed,

    #[error("signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("audience mismatch")]
    WrongAudience,

    #[error("token revoked")]
    Revoked,

    #[error("revocation store unavailable")]
    StoreUnavailable,
}
