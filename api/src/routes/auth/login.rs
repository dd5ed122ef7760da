use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_login_error, handle_validation_errors};

/// Handler for POST /auth/login
///
/// Exchanges an email and password for a signed token.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "password": "pw123456"
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
///     "message": "Login successful",
///     "data": { "success": true, "token": "eyJ..." },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or empty password
/// - 401 Unauthorized: Unknown email or wrong password (same body for both)
/// - 503 Service Unavailable: User store did not answer
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(issued) => {
            let response = LoginResponse {
                success: true,
                token: issued.token,
            };
            HttpResponse::Ok().json(ApiResponse::success_with_message(response, "Login successful"))
        }
        Err(error) => handle_login_error(error),
    }
}
