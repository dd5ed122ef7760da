//! Integration tests for the Redis revocation store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p ag_infra --test redis_integration -- --ignored

use std::sync::Arc;

use chrono::Duration;

use ag_core::domain::clock::{Clock, SystemClock};
use ag_core::repositories::RevocationStore;
use ag_infra::cache::{CacheConfig, RedisClient, RedisRevocationStore};

fn test_config() -> CacheConfig {
    let mut config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = format!("authgate_test_{}", uuid::Uuid::new_v4().simple());
    config
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(test_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_revoked_token_is_found_until_expiry() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = RedisRevocationStore::new(client.clone(), clock.clone());

    let expires_at = clock.now() + Duration::minutes(10);
    store.insert("jti-1", expires_at).await.unwrap();

    assert!(store.contains("jti-1").await.unwrap());
    assert!(!store.contains("jti-2").await.unwrap());

    let ttl = client.ttl(&client.key("revoked_token:jti-1")).await.unwrap().unwrap();
    assert!(ttl > 590 && ttl <= 600);

    client.delete(&client.key("revoked_token:jti-1")).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_purge_is_a_no_op() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let store = RedisRevocationStore::new(client, Arc::new(SystemClock));

    assert_eq!(store.purge_expired(chrono::Utc::now()).await.unwrap(), 0);
}
