//! DomainError to HTTP mapping
//!
//! Every handler and the JWT middleware render failures through this module
//! so the status codes and error codes stay consistent.

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::errors::{error_codes, ErrorResponse};

use crate::dto::ErrorResponseExt;

/// Map a domain error to its error body
pub fn error_response(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Auth(AuthError::UserNotFound) => {
            ErrorResponse::new(404, error_codes::USER_NOT_FOUND, "User not found")
        }
        DomainError::Auth(AuthError::InvalidCredentials) => invalid_credentials(),
        DomainError::Auth(AuthError::InsufficientPermissions) => ErrorResponse::new(
            403,
            error_codes::FORBIDDEN,
            "You do not have permission to access this resource",
        ),
        DomainError::Token(TokenError::InvalidToken) => {
            ErrorResponse::new(401, error_codes::INVALID_TOKEN, "Token is invalid or expired")
        }
        DomainError::Token(TokenError::SigningFailed) => {
            ErrorResponse::new(500, error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
        DomainError::Validation { message } => {
            ErrorResponse::new(400, error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::StoreUnavailable { .. } => ErrorResponse::new(
            503,
            error_codes::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable, please retry",
        ),
        DomainError::Internal { .. } => {
            ErrorResponse::new(500, error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    log_domain_error(&error);
    error_response(&error).to_response()
}

/// Login failures never reveal whether the account exists
pub fn handle_login_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::UserNotFound | AuthError::InvalidCredentials) => {
            invalid_credentials().to_response()
        }
        other => handle_domain_error(other),
    }
}

/// Render `validator` failures as a 400 with per-field messages
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response =
        ErrorResponse::new(400, error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    response.to_response()
}

/// Malformed or missing JSON bodies are validation errors, not 500s
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {}", error);
    let response = ErrorResponse::new(400, error_codes::VALIDATION_ERROR, error.to_string());
    actix_web::error::InternalError::from_response(error, response.to_response()).into()
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(404, error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response()
}

fn invalid_credentials() -> ErrorResponse {
    ErrorResponse::new(401, error_codes::INVALID_CREDENTIALS, "Invalid email or password")
}

fn log_domain_error(error: &DomainError) {
    match error {
        DomainError::Internal { .. }
        | DomainError::StoreUnavailable { .. }
        | DomainError::Token(TokenError::SigningFailed) => log::error!("Domain Error: {}", error),
        _ => log::debug!("Domain Error: {}", error),
    }
}
