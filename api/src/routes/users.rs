//! Current-user endpoints, mounted behind `JwtAuth`

use actix_web::{web, HttpResponse};

use ag_core::domain::entities::user::Role;
use ag_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::user::{AuthoritiesResponse, UserProfileResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /users/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    if let Err(error) = auth.require_any_role(&Role::ALL) {
        return handle_domain_error(error);
    }

    match state.auth_service.current_user(&auth.claims).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            UserProfileResponse::from(user),
            "Current user retrieved",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /users/authorities
///
/// Answers from the token alone; no user lookup.
pub async fn authorities(auth: AuthContext) -> HttpResponse {
    if let Err(error) = auth.require_any_role(&Role::ALL) {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(ApiResponse::success_with_message(
        AuthoritiesResponse {
            authorities: auth.authorities(),
        },
        "Current authorities retrieved",
    ))
}
