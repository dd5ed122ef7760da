//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use ag_api::app::{AppState, Backends};
use ag_core::domain::clock::{Clock, ManualClock};
use ag_core::domain::entities::user::{Role, User};
use ag_core::errors::DomainError;
use ag_core::repositories::{InMemoryRevocationStore, InMemoryUserRepository, RevocationStore};
use ag_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, PasswordHasher, TokenService,
    TokenServiceConfig,
};

pub const ALICE_EMAIL: &str = "alice@example.com";
pub const ALICE_PASSWORD: &str = "pw123456";
pub const BOB_EMAIL: &str = "bob@example.com";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<InMemoryUserRepository>,
    pub clock: Arc<ManualClock>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub async fn context() -> TestContext {
    context_with_store(Arc::new(InMemoryRevocationStore::new())).await
}

/// Alice holds USER; Bob holds no role at all
pub async fn context_with_store(store: Arc<dyn RevocationStore>) -> TestContext {
    let hasher = BcryptPasswordHasher::new(4).unwrap();
    let users = Arc::new(InMemoryUserRepository::new());
    let password_hash = hasher.hash(ALICE_PASSWORD).unwrap();
    users
        .insert(User::new("alice", ALICE_EMAIL, password_hash.clone(), vec![Role::User]))
        .await
        .unwrap();
    users
        .insert(User::new("bob", BOB_EMAIL, password_hash, vec![]))
        .await
        .unwrap();

    let clock = Arc::new(ManualClock::new(start()));
    let token_service = Arc::new(
        TokenService::new(
            store,
            TokenServiceConfig {
                signer_key: "integration-test-signer-key".to_string(),
                expiration_hours: 1,
                issuer: "authgate".to_string(),
                audience: "authgate-api".to_string(),
                store_timeout: Duration::from_millis(200),
            },
            clock.clone() as Arc<dyn Clock>,
        )
        .unwrap(),
    );

    let auth_service = AuthService::new(
        users.clone() as Arc<dyn ag_core::repositories::UserRepository>,
        token_service,
        Arc::new(hasher) as Arc<dyn PasswordHasher>,
        AuthServiceConfig {
            store_timeout: Duration::from_millis(200),
        },
    );

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(auth_service), Backends::default())),
        users,
        clock,
    }
}

/// Revocation store that fails writes, and reads too when `fail_reads` is set
pub struct BrokenRevocationStore {
    pub fail_reads: bool,
}

fn refused() -> DomainError {
    DomainError::Internal {
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl RevocationStore for BrokenRevocationStore {
    async fn insert(&self, _id: &str, _expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        Err(refused())
    }

    async fn contains(&self, _id: &str) -> Result<bool, DomainError> {
        if self.fail_reads {
            Err(refused())
        } else {
            Ok(false)
        }
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }
}
