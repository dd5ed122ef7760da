//! MySQL implementation of the UserRepository trait.
//!
//! Users live in `users`; their roles in `user_roles`, one row per role code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::warn;
use uuid::Uuid;

use ag_core::domain::entities::user::{Role, User};
use ag_core::errors::DomainError;
use ag_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a user and its roles in one transaction
    pub async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to create user: {}", e),
        })?;

        for role in &user.roles {
            sqlx::query("INSERT INTO user_roles (user_id, role) VALUES (?, ?)")
                .bind(user.id.to_string())
                .bind(role.code())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to assign role: {}", e),
                })?;
        }

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit user: {}", e),
        })?;

        Ok(())
    }

    async fn find_roles(&self, user_id: &str) -> Result<Vec<Role>, DomainError> {
        let rows = sqlx::query("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load roles: {}", e),
            })?;

        let mut roles = Vec::with_capacity(rows.len());
        for row in rows {
            let code: String = row.try_get("role").map_err(|e| DomainError::Internal {
                message: format!("Failed to get role: {}", e),
            })?;
            match code.parse::<Role>() {
                Ok(role) => roles.push(role),
                Err(e) => warn!("Skipping unknown role for user {}: {}", user_id, e),
            }
        }

        Ok(roles)
    }

    /// Convert database row to User entity, roles filled in separately
    fn row_to_user(row: &sqlx::mysql::MySqlRow, roles: Vec<Role>) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Internal {
                message: format!("Failed to get username: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row.try_get("password_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get password_hash: {}", e),
            })?,
            roles,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match row {
            Some(row) => {
                let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get id: {}", e),
                })?;
                let roles = self.find_roles(&id).await?;
                Ok(Some(Self::row_to_user(&row, roles)?))
            }
            None => Ok(None),
        }
    }
}
