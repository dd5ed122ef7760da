//! Wires configuration into storage backends and services
//!
//! Backend selection follows `USER_STORE` and `REVOCATION_STORE`. The admin
//! account is seeded into whichever user store is selected when it is absent.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use log::{info, warn};
use tokio::task::JoinHandle;

use ag_core::domain::clock::{Clock, SystemClock};
use ag_core::domain::entities::user::{Role, User};
use ag_core::repositories::{
    InMemoryRevocationStore, InMemoryUserRepository, RevocationStore, UserRepository,
};
use ag_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, PasswordHasher, RevocationCleanupConfig,
    RevocationCleanupService, TokenService, TokenServiceConfig,
};
use ag_infra::cache::{RedisClient, RedisRevocationStore};
use ag_infra::database::{DatabasePool, MySqlRevocationStore, MySqlUserRepository};
use ag_shared::config::{AppConfig, Environment, RevocationStoreKind, UserStoreKind};

use crate::app::{AppState, Backends};

pub const SEED_ADMIN_EMAIL: &str = "admin@example.com";
pub const SEED_ADMIN_USERNAME: &str = "admin";
const DEVELOPMENT_ADMIN_PASSWORD: &str = "12345678";

/// Everything `main` needs to serve requests
pub struct Bootstrapped {
    pub state: AppState,
    pub cleanup_task: Option<JoinHandle<()>>,
}

/// Build the application state from configuration
pub async fn build(config: &AppConfig) -> anyhow::Result<Bootstrapped> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let database = if config.storage.needs_database() {
        let pool = DatabasePool::new(config.database.clone())
            .await
            .context("connecting to MySQL")?;
        pool.run_migrations().await.context("running migrations")?;
        Some(pool)
    } else {
        None
    };

    let cache = if config.storage.revocations == RevocationStoreKind::Redis {
        Some(
            RedisClient::new(config.cache.clone())
                .await
                .context("connecting to Redis")?,
        )
    } else {
        None
    };

    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.auth.password.bcrypt_cost)?);

    let revocation_store =
        revocation_store(config.storage.revocations, &database, &cache, clock.clone())?;
    let user_store = user_store(config, &database, hasher.as_ref()).await?;

    let token_service = Arc::new(TokenService::new(
        revocation_store,
        TokenServiceConfig::from(&config.auth),
        clock,
    )?);
    let auth_service = Arc::new(AuthService::new(
        user_store,
        token_service.clone(),
        hasher,
        AuthServiceConfig::from(&config.auth),
    ));

    let cleanup = Arc::new(RevocationCleanupService::new(
        token_service,
        RevocationCleanupConfig::from(&config.auth),
    ));
    let cleanup_task = cleanup.start_background_task();

    info!(
        "Storage: users={:?}, revocations={:?}",
        config.storage.users, config.storage.revocations
    );

    Ok(Bootstrapped {
        state: AppState::new(
            auth_service,
            Backends {
                user_store: config.storage.users,
                revocation_store: config.storage.revocations,
                database,
                cache,
            },
        ),
        cleanup_task,
    })
}

fn revocation_store(
    kind: RevocationStoreKind,
    database: &Option<DatabasePool>,
    cache: &Option<RedisClient>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<dyn RevocationStore>> {
    let store: Arc<dyn RevocationStore> = match kind {
        RevocationStoreKind::Memory => {
            warn!("Using in-memory revocation store; revocations are lost on restart");
            Arc::new(InMemoryRevocationStore::new())
        }
        RevocationStoreKind::Mysql => {
            let pool = database
                .as_ref()
                .ok_or_else(|| anyhow!("MySQL revocation store selected without a database"))?;
            Arc::new(MySqlRevocationStore::new(pool.get_pool().clone()))
        }
        RevocationStoreKind::Redis => {
            let client = cache
                .as_ref()
                .ok_or_else(|| anyhow!("Redis revocation store selected without a client"))?;
            Arc::new(RedisRevocationStore::new(client.clone(), clock))
        }
    };
    Ok(store)
}

async fn user_store(
    config: &AppConfig,
    database: &Option<DatabasePool>,
    hasher: &dyn PasswordHasher,
) -> anyhow::Result<Arc<dyn UserRepository>> {
    let password = seed_admin_password(config.environment, config.storage.seed_admin_password.as_deref());

    match config.storage.users {
        UserStoreKind::Memory => {
            let repository = InMemoryUserRepository::new();
            if let Some(password) = password {
                repository.insert(seed_admin(hasher, &password)?).await?;
                info!("Seeded {} into the in-memory user store", SEED_ADMIN_EMAIL);
            }
            Ok(Arc::new(repository))
        }
        UserStoreKind::Mysql => {
            let pool = database
                .as_ref()
                .ok_or_else(|| anyhow!("MySQL user store selected without a database"))?;
            let repository = MySqlUserRepository::new(pool.get_pool().clone());
            if let Some(password) = password {
                if repository.find_by_email(SEED_ADMIN_EMAIL).await?.is_none() {
                    repository.create(&seed_admin(hasher, &password)?).await?;
                    info!("Seeded {} into the MySQL user store", SEED_ADMIN_EMAIL);
                }
            }
            Ok(Arc::new(repository))
        }
    }
}

/// Password for the seeded admin, `None` when nothing should be seeded
pub fn seed_admin_password(environment: Environment, configured: Option<&str>) -> Option<String> {
    match configured {
        Some(password) if !password.is_empty() => Some(password.to_string()),
        _ if environment.is_production() => {
            warn!("SEED_ADMIN_PASSWORD is not set; skipping admin seeding in production");
            None
        }
        _ => {
            warn!(
                "SEED_ADMIN_PASSWORD is not set; seeding {} with the development default password",
                SEED_ADMIN_EMAIL
            );
            Some(DEVELOPMENT_ADMIN_PASSWORD.to_string())
        }
    }
}

/// The seeded administrator, holding every role
pub fn seed_admin(hasher: &dyn PasswordHasher, password: &str) -> anyhow::Result<User> {
    let hash = hasher.hash(password)?;
    Ok(User::new(
        SEED_ADMIN_USERNAME,
        SEED_ADMIN_EMAIL,
        hash,
        Role::ALL.to_vec(),
    ))
}
