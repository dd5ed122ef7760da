//! MySQL implementation of the RevocationStore trait.
//!
//! Revoked token ids live in `invalidated_tokens` until the background
//! cleanup task deletes them after their expiry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ag_core::errors::DomainError;
use ag_core::repositories::RevocationStore;

/// MySQL implementation of RevocationStore
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationStore {
    /// Create a new MySQL revocation store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn insert(&self, id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO invalidated_tokens (id, expires_at)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert invalidated token: {}", e),
            })?;

        Ok(())
    }

    async fn contains(&self, id: &str) -> Result<bool, DomainError> {
        let query = "SELECT COUNT(*) AS count FROM invalidated_tokens WHERE id = ?";

        let row = sqlx::query(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to look up invalidated token: {}", e),
            })?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;

        Ok(count > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM invalidated_tokens WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to purge invalidated tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
