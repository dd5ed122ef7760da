//! Type definitions shared by the HTTP layer
//!
//! - `response` - API response envelope and health document

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
