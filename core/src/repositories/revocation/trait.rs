//! Revocation store trait defining the interface for the set of revoked token ids.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Persisted set of revoked token identifiers
///
/// This is the only shared mutable state in the token lifecycle. Implementations
/// must be safe to call concurrently from every request worker.
///
/// # Consistency
/// - `insert` is an upsert: inserting an existing id replaces its expiry
/// - once `insert` returns `Ok`, every later `contains` for that id returns `true`
///   until the entry is purged after its expiry
/// - entries past their expiry may linger; they are harmless because the token
///   they describe is already expired
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token id as revoked until `expires_at`
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use ag_core::repositories::RevocationStore;
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// store.insert("6f1c0a7e9b3d4e21a8c5f0d2b7e9a1c3", Utc::now() + Duration::hours(1)).await?;
    /// assert!(store.contains("6f1c0a7e9b3d4e21a8c5f0d2b7e9a1c3").await?);
    /// # Ok(())
    /// # }
    /// ```
    async fn insert(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Check whether a token id has been revoked
    ///
    /// # Returns
    /// * `Ok(true)` - Id is revoked
    /// * `Ok(false)` - Id is unknown
    /// * `Err(DomainError)` - Store failed; callers must treat the token as invalid
    async fn contains(&self, id: &str) -> Result<bool, DomainError>;

    /// Delete entries whose expiry is at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
