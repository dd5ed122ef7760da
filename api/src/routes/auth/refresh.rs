use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{RefreshResponse, TokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

const REFRESHED: &str = "Token refreshed successfully";

/// Handler for POST /auth/refresh
///
/// Rotates a valid token: the presented one is revoked and a new one issued.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "status": 200,
///     "message": "Token refreshed successfully",
///     "data": { "success": true, "token": "eyJ...", "message": "Token refreshed successfully" },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Token invalid, expired or already rotated
/// - 404 Not Found: The token's user no longer exists
/// - 500 Internal Server Error: Old token could not be revoked
pub async fn refresh(state: web::Data<AppState>, request: web::Json<TokenRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.refresh(&request.token).await {
        Ok(issued) => {
            let response = RefreshResponse {
                success: true,
                token: issued.token,
                message: REFRESHED.to_string(),
            };
            HttpResponse::Ok().json(ApiResponse::success_with_message(response, REFRESHED))
        }
        Err(error) => handle_domain_error(error),
    }
}
