//! Periodic purge of expired revocation entries
//!
//! Entries outlive their usefulness once the token they name has expired.
//! Stores without native expiry (MySQL, memory) rely on this task to stay small.

use std::sync::Arc;
use tracing::{error, info, warn};

use ag_shared::config::AuthConfig;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;

use super::service::TokenService;

/// Configuration for the revocation cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

impl From<&AuthConfig> for RevocationCleanupConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_secs,
            enabled: config.cleanup_enabled && config.cleanup_interval_secs > 0,
        }
    }
}

/// Service for purging expired revocation entries
pub struct RevocationCleanupService<R: RevocationStore + ?Sized + 'static> {
    token_service: Arc<TokenService<R>>,
    config: RevocationCleanupConfig,
}

impl<R: RevocationStore + ?Sized + 'static> RevocationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(token_service: Arc<TokenService<R>>, config: RevocationCleanupConfig) -> Self {
        Self {
            token_service,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Store failures are recorded in the result rather than returned, so a
    /// flaky store never stops the background loop.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting revocation cleanup cycle");

        let mut result = CleanupResult::default();

        match self.token_service.purge_expired().await {
            Ok(count) => {
                result.expired_entries_deleted = count;
            }
            Err(e) => {
                error!("Failed to purge revocation entries: {}", e);
                result.errors.push(format!("Revocation cleanup error: {}", e));
            }
        }

        info!(
            "Revocation cleanup completed - Expired entries: {}",
            result.expired_entries_deleted
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Revocation cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired revocation entries deleted
    pub expired_entries_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
