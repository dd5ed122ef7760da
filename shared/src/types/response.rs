//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// HTTP status code mirrored into the body
    pub status: u16,

    /// Short human-readable summary
    pub message: String,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Create a 200 response carrying data
    pub fn success(data: T) -> Self {
        Self::with_status(200, "OK", Some(data))
    }

    /// Create a 200 response with a custom message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::with_status(200, message, Some(data))
    }

    /// Create a response with an explicit status code
    pub fn with_status(status: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: (200..300).contains(&status),
            status,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiResponse<()> {
    /// Create a 200 response without a body
    pub fn empty(message: impl Into<String>) -> Self {
        Self::with_status(200, message, None)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Individual backend health checks
    pub services: HashMap<String, ServiceHealth>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual backend health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Backend status
    pub status: HealthStatus,

    /// Backend kind or failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
