//! User repository trait defining the interface for user lookup.
//!
//! The token lifecycle only ever resolves users by email, the subject of every
//! token it issues.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity lookup
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ag_core::repositories::UserRepository;
/// use ag_core::domain::entities::user::User;
/// use ag_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Backing store failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
