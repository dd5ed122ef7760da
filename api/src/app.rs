//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{body::MessageBody, middleware::Logger, web, App};

use ag_core::repositories::{RevocationStore, UserRepository};
use ag_core::services::AuthService;
use ag_infra::cache::RedisClient;
use ag_infra::database::DatabasePool;
use ag_shared::config::{RevocationStoreKind, UserStoreKind};

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::auth::JwtAuth;
use crate::routes::{auth, health, users};

/// Authentication service over whichever storage backends were selected at startup
pub type SharedAuthService = AuthService<dyn UserRepository, dyn RevocationStore>;

/// Backends the health endpoint reports on
#[derive(Clone, Default)]
pub struct Backends {
    pub user_store: UserStoreKind,
    pub revocation_store: RevocationStoreKind,
    pub database: Option<DatabasePool>,
    pub cache: Option<RedisClient>,
}

/// Application state shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<SharedAuthService>,
    pub backends: Backends,
}

impl AppState {
    pub fn new(auth_service: Arc<SharedAuthService>, backends: Backends) -> Self {
        Self {
            auth_service,
            backends,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .configure(configure)
        .default_service(web::route().to(not_found))
}

/// Register every route; shared by `create_app` and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(auth::login::login))
                .route("/introspect", web::post().to(auth::introspect::introspect))
                .route("/logout", web::post().to(auth::logout::logout))
                .route("/refresh", web::post().to(auth::refresh::refresh)),
        )
        .service(
            web::scope("/users")
                .wrap(JwtAuth::new())
                .route("/me", web::get().to(users::me))
                .route("/authorities", web::get().to(users::authorities)),
        );
}
