//! Health check endpoint

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use ag_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// Handler for GET /health
///
/// 200 while every configured backend answers, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backends = &state.backends;
    let mut services = HashMap::new();

    services.insert(
        "user_store".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{:?}", backends.user_store).to_lowercase()),
        },
    );
    services.insert(
        "revocation_store".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{:?}", backends.revocation_store).to_lowercase()),
        },
    );

    if let Some(database) = &backends.database {
        let health = match database.health_check().await {
            Ok(true) => healthy(database.get_statistics().to_string()),
            Ok(false) => unhealthy("unexpected response".to_string()),
            Err(e) => unhealthy(e.to_string()),
        };
        services.insert("mysql".to_string(), health);
    }

    if let Some(cache) = &backends.cache {
        let health = match cache.health_check().await {
            Ok(true) => healthy("PONG".to_string()),
            Ok(false) => unhealthy("unexpected response".to_string()),
            Err(e) => unhealthy(e.to_string()),
        };
        services.insert("redis".to_string(), health);
    }

    let status = if services.values().all(|s| s.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let body = HealthResponse {
        status,
        services,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if status == HealthStatus::Healthy {
        HttpResponse::Ok().json(body)
    } else {
        log::warn!("Health check failed: {:?}", body.services);
        HttpResponse::ServiceUnavailable().json(body)
    }
}

fn healthy(message: String) -> ServiceHealth {
    ServiceHealth {
        status: HealthStatus::Healthy,
        message: Some(message),
    }
}

fn unhealthy(message: String) -> ServiceHealth {
    ServiceHealth {
        status: HealthStatus::Unhealthy,
        message: Some(message),
    }
}
