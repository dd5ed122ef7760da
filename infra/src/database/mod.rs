//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - User lookup by email
//! - The `invalidated_tokens` revocation store
//! - Embedded schema migrations

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlRevocationStore, MySqlUserRepository};
