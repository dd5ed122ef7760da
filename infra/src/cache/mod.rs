//! Cache module for Redis-backed revocation
//!
//! This module provides the Redis client with retry logic and the
//! revocation store that keeps one expiring key per revoked token.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use ag_shared::config::CacheConfig;
