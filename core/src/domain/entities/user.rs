//! User entity representing an account allowed to obtain session tokens.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix applied to role codes when they are exposed as authorities
pub const AUTHORITY_PREFIX: &str = "ROLE_";

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Regular account
    User,
    /// Content moderation access
    Moderator,
}

impl Role {
    /// All roles, in declaration order
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Moderator];

    /// Code placed in the token's `scope` claim
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
        }
    }

    /// Authority string, e.g. `ROLE_ADMIN`
    pub fn authority(&self) -> String {
        format!("{}{}", AUTHORITY_PREFIX, self.code())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let code = code.strip_prefix(AUTHORITY_PREFIX).unwrap_or(code);
        match code.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            "MODERATOR" => Ok(Role::Moderator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub username: String,

    /// Login identifier and token subject
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Granted roles
    pub roles: Vec<Role>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the user holds `role`
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Role codes as a sorted, de-duplicated set
    pub fn role_codes(&self) -> BTreeSet<String> {
        self.roles.iter().map(|role| role.code().to_string()).collect()
    }
}
