//! Main authentication service implementation

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Plaintext behind the hash compared against when an email is unknown
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-password-placeholder";

/// Authentication service driving a token through `issued -> active -> (revoked | expired)`
pub struct AuthService<U, R>
where
    U: UserRepository + ?Sized,
    R: RevocationStore + ?Sized,
{
    /// User lookup by email
    user_repository: Arc<U>,
    /// Token issuance, verification and revocation
    token_service: Arc<TokenService<R>>,
    /// Password comparison policy
    password_hasher: Arc<dyn PasswordHasher>,
    /// Hash at the configured cost, compared against on a user miss
    unknown_user_hash: String,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R> AuthService<U, R>
where
    U: UserRepository + ?Sized,
    R: RevocationStore + ?Sized,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository resolving users by email
    /// * `token_service` - Service for token management
    /// * `password_hasher` - Policy used to compare passwords
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<R>>,
        password_hasher: Arc<dyn PasswordHasher>,
        config: AuthServiceConfig,
    ) -> Self {
        let unknown_user_hash = password_hasher
            .hash(UNKNOWN_USER_PASSWORD)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to prepare hash for unknown-user logins");
                String::new()
            });

        Self {
            user_repository,
            token_service,
            password_hasher,
            unknown_user_hash,
            config,
        }
    }

    /// Exchange credentials for a fresh token
    ///
    /// Never consults the revocation store. An unknown email still pays for one
    /// password comparison so both rejections take the same time.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Credentials accepted
    /// * `Err(DomainError::Auth(UserNotFound | InvalidCredentials))` - Rejected
    /// * `Err(DomainError::StoreUnavailable)` - User lookup failed or timed out
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let user = match self.find_user(email).await? {
            Some(user) => user,
            None => {
                self.password_matches(password, &self.unknown_user_hash).await?;
                debug!("Login rejected: unknown email");
                return Err(DomainError::Auth(AuthError::UserNotFound));
            }
        };

        if !self.password_matches(password, &user.password_hash).await? {
            info!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        let issued = self.token_service.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(issued)
    }

    /// Report whether a token is currently valid
    ///
    /// Side-effect free; every failure, including an unavailable store, is `false`.
    pub async fn introspect(&self, token: &str) -> bool {
        self.token_service.verify(token).await.is_ok()
    }

    /// Verify a token and return its claims
    pub async fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        Ok(self.token_service.verify(token).await?)
    }

    /// Revoke the presented token
    ///
    /// A token that is already revoked, expired or forged is rejected with
    /// `TokenError::InvalidToken`.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        let claims = self.authenticate(token).await?;
        self.token_service.revoke(&claims).await?;

        info!(user_id = %claims.user_id, "User logged out");
        Ok(())
    }

    /// Rotate the presented token
    ///
    /// The old token is revoked before the new one is issued, so a rotated
    /// token fails every later verification, including another refresh.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The replacement token
    /// * `Err(DomainError::Token(InvalidToken))` - Presented token not valid
    /// * `Err(DomainError::Auth(UserNotFound))` - Subject no longer exists
    pub async fn refresh(&self, token: &str) -> DomainResult<IssuedToken> {
        let claims = self.authenticate(token).await?;

        let user = self
            .find_user(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.user_id, "Refresh rejected: subject no longer exists");
                DomainError::Auth(AuthError::UserNotFound)
            })?;

        self.token_service.revoke(&claims).await?;
        let issued = self.token_service.issue(&user)?;

        debug!(old_jti = %claims.jti, new_jti = %issued.jti, "Token rotated");
        Ok(issued)
    }

    /// Resolve the user behind verified claims
    pub async fn current_user(&self, claims: &Claims) -> DomainResult<User> {
        self.find_user(&claims.sub)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    pub fn token_service(&self) -> &Arc<TokenService<R>> {
        &self.token_service
    }

    async fn find_user(&self, email: &str) -> DomainResult<Option<User>> {
        match timeout(self.config.store_timeout, self.user_repository.find_by_email(email)).await {
            Ok(Ok(user)) => Ok(user),
            Ok(Err(e)) => {
                error!(error = %e, "User lookup failed");
                Err(DomainError::StoreUnavailable {
                    message: format!("User lookup failed: {}", e),
                })
            }
            Err(_) => {
                error!("User lookup timed out");
                Err(DomainError::StoreUnavailable {
                    message: "User lookup timed out".to_string(),
                })
            }
        }
    }

    /// bcrypt is CPU bound, so the comparison runs on the blocking pool
    async fn password_matches(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        let hasher = self.password_hasher.clone();
        let plain = plain.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.matches(&plain, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password check aborted: {}", e),
            })
    }
}

