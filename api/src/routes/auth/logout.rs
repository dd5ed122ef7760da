use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::TokenRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /auth/logout
///
/// Revokes the presented token until its natural expiry.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty token
/// - 401 Unauthorized: Token invalid, expired or already revoked
/// - 500 Internal Server Error: Revocation could not be recorded
pub async fn logout(state: web::Data<AppState>, request: web::Json<TokenRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.logout(&request.token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::empty("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
