//! Storage backend selection

use serde::{Deserialize, Serialize};

/// Where user records are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStoreKind {
    /// Process-local store seeded at startup
    #[default]
    Memory,
    /// MySQL `users` / `roles` tables
    Mysql,
}

/// Where revoked token identifiers are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevocationStoreKind {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// MySQL `invalidated_tokens` table
    Mysql,
    /// Redis keys expiring with the token
    Redis,
}

impl std::str::FromStr for UserStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(UserStoreKind::Memory),
            "mysql" => Ok(UserStoreKind::Mysql),
            _ => Err(format!("Invalid user store: {}", s)),
        }
    }
}

impl std::str::FromStr for RevocationStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(RevocationStoreKind::Memory),
            "mysql" => Ok(RevocationStoreKind::Mysql),
            "redis" => Ok(RevocationStoreKind::Redis),
            _ => Err(format!("Invalid revocation store: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub users: UserStoreKind,
    pub revocations: RevocationStoreKind,
    /// Password for the admin account seeded into the selected user store
    #[serde(skip_serializing, default)]
    pub seed_admin_password: Option<String>,
}

impl StorageConfig {
    /// Create from environment variables
    ///
    /// Unset selectors default to the memory stores; unrecognised ones are errors.
    pub fn from_env() -> Result<Self, String> {
        Self::from_values(
            std::env::var("USER_STORE").ok().as_deref(),
            std::env::var("REVOCATION_STORE").ok().as_deref(),
            std::env::var("SEED_ADMIN_PASSWORD").ok(),
        )
    }

    /// Build from raw selector values
    pub fn from_values(
        users: Option<&str>,
        revocations: Option<&str>,
        seed_admin_password: Option<String>,
    ) -> Result<Self, String> {
        let users = match users {
            Some(value) => value.trim().parse()?,
            None => UserStoreKind::default(),
        };
        let revocations = match revocations {
            Some(value) => value.trim().parse()?,
            None => RevocationStoreKind::default(),
        };

        Ok(Self {
            users,
            revocations,
            seed_admin_password,
        })
    }

    /// Whether a MySQL pool is needed at all
    pub fn needs_database(&self) -> bool {
        self.users == UserStoreKind::Mysql || self.revocations == RevocationStoreKind::Mysql
    }
}
