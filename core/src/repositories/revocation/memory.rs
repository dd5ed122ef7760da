//! In-memory implementation of RevocationStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// Process-local revocation list; entries are lost on restart
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn insert(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(id.to_string(), expires_at);
        Ok(())
    }

    async fn contains(&self, id: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok(before - entries.len())
    }
}
