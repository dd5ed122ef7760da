use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{IntrospectResponse, TokenRequest};
use crate::handlers::error::handle_validation_errors;

/// Handler for POST /auth/introspect
///
/// Always 200 for a well-formed request; `data.valid` carries the verdict.
/// Rejection reasons are only logged.
pub async fn introspect(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let valid = state.auth_service.introspect(&request.token).await;
    HttpResponse::Ok().json(ApiResponse::success_with_message(
        IntrospectResponse { valid },
        "Introspection completed",
    ))
}
