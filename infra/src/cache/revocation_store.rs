//! Redis implementation of the RevocationStore trait.
//!
//! Each revoked token becomes `{prefix}:revoked_token:{jti}` with a TTL that
//! ends when the token would have expired anyway, so Redis does the purging.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use ag_core::domain::clock::Clock;
use ag_core::errors::DomainError;
use ag_core::repositories::RevocationStore;

use super::redis_client::RedisClient;

const REVOKED_TOKEN_NAMESPACE: &str = "revoked_token";

/// Redis implementation of RevocationStore
pub struct RedisRevocationStore {
    client: RedisClient,
    clock: Arc<dyn Clock>,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    fn entry_key(&self, id: &str) -> String {
        self.client.key(&revoked_token_suffix(id))
    }
}

pub(crate) fn revoked_token_suffix(id: &str) -> String {
    format!("{}:{}", REVOKED_TOKEN_NAMESPACE, id)
}

/// Seconds until `expires_at`, never less than one so the key is written at all
pub(crate) fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (expires_at - now).num_seconds().max(1) as u64
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn insert(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let ttl = ttl_seconds(expires_at, self.clock.now());
        self.client
            .set_with_expiry(&self.entry_key(id), "1", ttl)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to store revoked token: {}", e),
            })
    }

    async fn contains(&self, id: &str) -> Result<bool, DomainError> {
        self.client
            .exists(&self.entry_key(id))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to look up revoked token: {}", e),
            })
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        debug!("Redis expires revoked tokens itself, nothing to purge");
        Ok(0)
    }
}
