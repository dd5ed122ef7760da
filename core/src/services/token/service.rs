//! Main token service implementation

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::token::{Claims, IssuedToken, Rejection};
use crate::domain::entities::user::User;
use ag_shared::config::MAX_EXPIRATION_HOURS;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;

use super::claims::ClaimsBuilder;
use super::codec::{TokenSigner, TokenVerifier};
use super::config::TokenServiceConfig;

/// Service for issuing, verifying and revoking session tokens
pub struct TokenService<R: RevocationStore + ?Sized> {
    store: Arc<R>,
    claims_builder: ClaimsBuilder,
    signer: TokenSigner,
    verifier: TokenVerifier,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl<R: RevocationStore + ?Sized> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store consulted on every verification
    /// * `config` - Signing key, lifetime, issuer and audience
    /// * `clock` - Source of "now" for issuance and expiry checks
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a validation error for an empty key or a
    /// lifetime outside `1..=MAX_EXPIRATION_HOURS`
    pub fn new(
        store: Arc<R>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let ttl = Some(config.expiration_hours)
            .filter(|hours| (1..=MAX_EXPIRATION_HOURS).contains(hours))
            .and_then(chrono::Duration::try_hours)
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "Token lifetime must be between 1 and {} hours, got {}",
                    MAX_EXPIRATION_HOURS, config.expiration_hours
                ),
            })?;

        let secret = config.signer_key.as_bytes();
        let signer = TokenSigner::new(secret)?;
        let verifier = TokenVerifier::new(secret, config.audience.clone(), clock.clone())?;
        let claims_builder = ClaimsBuilder::new(config.issuer, config.audience, ttl);

        Ok(Self {
            store,
            claims_builder,
            signer,
            verifier,
            clock,
            store_timeout: config.store_timeout,
        })
    }

    /// Issues a fresh token for `user`
    ///
    /// Never touches the revocation store.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let claims = self.claims_builder.build(user, self.clock.now())?;
        let token = self.signer.sign(&claims)?;

        debug!(jti = %claims.jti, user_id = %claims.user_id, "Issued token");

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
            jti: claims.jti,
        })
    }

    /// Runs the full verification pipeline
    ///
    /// The first failing step decides the rejection. A revocation store that
    /// errors or times out rejects the token.
    pub async fn verify(&self, token: &str) -> Result<Claims, Rejection> {
        let result = self.verify_inner(token).await;
        if let Err(rejection) = &result {
            debug!(reason = %rejection, "Token rejected");
        }
        result
    }

    async fn verify_inner(&self, token: &str) -> Result<Claims, Rejection> {
        let claims = self.verifier.verify(token)?;

        match timeout(self.store_timeout, self.store.contains(&claims.jti)).await {
            Ok(Ok(false)) => Ok(claims),
            Ok(Ok(true)) => Err(Rejection::Revoked),
            Ok(Err(e)) => {
                warn!(error = %e, "Revocation lookup failed");
                Err(Rejection::StoreUnavailable)
            }
            Err(_) => {
                warn!(timeout = ?self.store_timeout, "Revocation lookup timed out");
                Err(Rejection::StoreUnavailable)
            }
        }
    }

    /// Records the token described by `claims` as revoked until it expires
    ///
    /// Store failures surface as `DomainError::Internal`.
    pub async fn revoke(&self, claims: &Claims) -> Result<(), DomainError> {
        match timeout(
            self.store_timeout,
            self.store.insert(&claims.jti, claims.expires_at()),
        )
        .await
        {
            Ok(Ok(())) => {
                debug!(jti = %claims.jti, "Token revoked");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to record revocation");
                Err(DomainError::Internal {
                    message: format!("Failed to record revocation: {}", e),
                })
            }
            Err(_) => {
                error!("Recording revocation timed out");
                Err(DomainError::Internal {
                    message: "Recording revocation timed out".to_string(),
                })
            }
        }
    }

    /// Deletes revocation entries whose token has expired
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        let now = self.clock.now();
        let purged = timeout(self.store_timeout, self.store.purge_expired(now))
            .await
            .map_err(|_| DomainError::StoreUnavailable {
                message: "Purging revocation entries timed out".to_string(),
            })??;

        if purged > 0 {
            info!("Purged {} expired revocation entries", purged);
        }
        Ok(purged)
    }

    /// Configured token lifetime
    pub fn ttl(&self) -> chrono::Duration {
        self.claims_builder.ttl()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
