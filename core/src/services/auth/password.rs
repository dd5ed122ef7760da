//! Password hashing policy

use crate::errors::DomainError;

/// Hash-and-compare policy for stored passwords
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Compare a plaintext password with a stored hash
    ///
    /// A malformed stored hash is a mismatch, not an error.
    fn matches(&self, plain: &str, hash: &str) -> bool;
}

/// bcrypt with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !(4..=31).contains(&cost) {
            return Err(DomainError::Validation {
                message: format!("bcrypt cost must be between 4 and 31, got {}", cost),
            });
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn matches(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}
