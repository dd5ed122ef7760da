//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the Bearer token from the Authorization header,
//! runs it through the same verification pipeline as `/auth/introspect`
//! (including the revocation lookup) and injects an `AuthContext` into the
//! request. Nothing is stored in global state.

use std::collections::BTreeSet;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use ag_core::domain::entities::token::Claims;
use ag_core::domain::entities::user::Role;
use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::errors::{error_codes, ErrorResponse};

use crate::app::AppState;
use crate::dto::ErrorResponseExt;
use crate::handlers::error::error_response;

/// Authenticated identity injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `userId` claim
    pub user_id: Uuid,
    /// Subject (email)
    pub email: String,
    pub username: String,
    /// Role codes from the `scope` claim
    pub roles: BTreeSet<String>,
    /// Token ID, for log correlation
    pub jti: String,
    /// Verified claims, for handlers that need to resolve the user
    pub claims: Claims,
}

impl AuthContext {
    /// Creates a new authentication context from verified claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.sub.clone(),
            username: claims.username.clone(),
            roles: claims.scope.clone(),
            jti: claims.jti.clone(),
            claims,
        }
    }

    /// Authorities in `ROLE_<CODE>` form
    pub fn authorities(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|code| match code.parse::<Role>() {
                Ok(role) => role.authority(),
                Err(_) => format!("{}{}", ag_core::domain::entities::user::AUTHORITY_PREFIX, code),
            })
            .collect()
    }

    /// Succeeds when the context holds at least one of `roles`
    pub fn require_any_role(&self, roles: &[Role]) -> Result<(), DomainError> {
        if roles.iter().any(|role| self.roles.contains(role.code())) {
            Ok(())
        } else {
            Err(DomainError::Auth(AuthError::InsufficientPermissions))
        }
    }
}

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(reject(
                        req,
                        ErrorResponse::new(
                            401,
                            error_codes::UNAUTHORIZED,
                            "Missing or invalid Authorization header",
                        ),
                    ));
                }
            };

            let state = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.clone(),
                None => {
                    log::error!("JwtAuth mounted without AppState");
                    let body = error_response(&DomainError::Internal {
                        message: "authentication not configured".to_string(),
                    });
                    return Ok(reject(req, body));
                }
            };

            let claims = match state.auth_service.authenticate(&token).await {
                Ok(claims) => claims,
                Err(_) => {
                    let body = error_response(&DomainError::Token(TokenError::InvalidToken));
                    return Ok(reject(req, body));
                }
            };

            log::debug!("Authenticated request for jti {}", claims.jti);
            req.extensions_mut().insert(AuthContext::from_claims(claims));

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit the request with an error body
fn reject<B>(req: ServiceRequest, body: ErrorResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(body.to_response()).map_into_right_body()
}

fn unauthorized(body: ErrorResponse) -> Error {
    let message = body.message.clone();
    InternalError::from_response(message, body.to_response()).into()
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                unauthorized(ErrorResponse::new(
                    401,
                    error_codes::UNAUTHORIZED,
                    "Authentication required",
                ))
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::domain::entities::token::Audience;

    fn claims_with_scope(scope: &[&str]) -> Claims {
        Claims {
            sub: "alice@example.com".to_string(),
            iss: "authgate".to_string(),
            aud: Audience::Single("authgate-api".to_string()),
            iat: 1_704_110_400,
            exp: 1_704_114_000,
            jti: "00112233445566778899aabbccddeeff".to_string(),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            scope: scope.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_role_gate() {
        let context = AuthContext::from_claims(claims_with_scope(&["MODERATOR"]));
        assert!(context.require_any_role(&Role::ALL).is_ok());
        assert_eq!(
            context.require_any_role(&[Role::Admin]),
            Err(DomainError::Auth(AuthError::InsufficientPermissions))
        );

        let no_roles = AuthContext::from_claims(claims_with_scope(&[]));
        assert!(no_roles.require_any_role(&Role::ALL).is_err());
    }

    #[test]
    fn test_authorities_are_prefixed() {
        let context = AuthContext::from_claims(claims_with_scope(&["ADMIN", "USER"]));
        assert_eq!(context.authorities(), vec!["ROLE_ADMIN", "ROLE_USER"]);
    }
}
