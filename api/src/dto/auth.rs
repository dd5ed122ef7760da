//! Authentication request and response bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Body of `POST /auth/introspect`, `/auth/logout` and `/auth/refresh`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Token must not be empty"))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
}
