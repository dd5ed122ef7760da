//! Integration tests for the /auth endpoints

mod common;

use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use ag_api::app::configure;
use ag_api::handlers::error::json_error_handler;
use common::{context, context_with_store, BrokenRevocationStore, ALICE_EMAIL, ALICE_PASSWORD};

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! login {
    ($app:expr) => {{
        let (status, body) = post!(
            $app,
            "/auth/login",
            json!({ "email": ALICE_EMAIL, "password": ALICE_PASSWORD })
        );
        assert_eq!(status, 200, "login failed: {}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! introspect {
    ($app:expr, $token:expr) => {{
        let (status, body) = post!($app, "/auth/introspect", json!({ "token": $token }));
        assert_eq!(status, 200);
        body["data"]["valid"].as_bool().unwrap()
    }};
}

#[actix_web::test]
async fn test_login_returns_token_in_envelope() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let (status, body) = post!(
        app,
        "/auth/login",
        json!({ "email": ALICE_EMAIL, "password": ALICE_PASSWORD })
    );

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["token"].as_str().unwrap().split('.').count(), 3);
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_login_failures_share_one_body() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let (wrong_status, wrong_body) = post!(
        app,
        "/auth/login",
        json!({ "email": ALICE_EMAIL, "password": "not-the-password" })
    );
    let (unknown_status, unknown_body) = post!(
        app,
        "/auth/login",
        json!({ "email": "nobody@example.com", "password": ALICE_PASSWORD })
    );

    assert_eq!(wrong_status, 401);
    assert_eq!(unknown_status, 401);
    assert_eq!(wrong_body["error"], "invalid_credentials");
    assert_eq!(wrong_body["error"], unknown_body["error"]);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[actix_web::test]
async fn test_login_validation_errors() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let (status, body) = post!(
        app,
        "/auth/login",
        json!({ "email": "not-an-email", "password": ALICE_PASSWORD })
    );
    assert_eq!(status, 400);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["email"].is_array());

    let (status, body) = post!(app, "/auth/login", json!({ "email": ALICE_EMAIL }));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_fresh_token_introspects_valid() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let token = login!(app);
    assert!(introspect!(app, &token));
}

#[actix_web::test]
async fn test_introspect_garbage_is_invalid_not_error() {
    let ctx = context().await;
    let app = init_app!(ctx);

    assert!(!introspect!(app, "not.a.token"));
    assert!(!introspect!(app, "garbage"));
}

#[actix_web::test]
async fn test_logout_then_introspect() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let token = login!(app);
    let (status, body) = post!(app, "/auth/logout", json!({ "token": token }));
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Logged out successfully");
    assert!(body.get("data").is_none());

    assert!(!introspect!(app, &token));

    let (status, body) = post!(app, "/auth/logout", json!({ "token": token }));
    assert_eq!(status, 401);
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_refresh_rotates_token() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let old = login!(app);
    let (status, body) = post!(app, "/auth/refresh", json!({ "token": old }));
    assert_eq!(status, 200);
    assert_eq!(body["data"]["success"], true);
    let new = body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(new, old);

    assert!(!introspect!(app, &old));
    assert!(introspect!(app, &new));

    let (status, body) = post!(app, "/auth/refresh", json!({ "token": old }));
    assert_eq!(status, 401);
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_token_expires_after_lifetime() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let token = login!(app);
    ctx.clock.advance(Duration::minutes(59));
    assert!(introspect!(app, &token));

    ctx.clock.advance(Duration::minutes(2));
    assert!(!introspect!(app, &token));

    let (status, _) = post!(app, "/auth/refresh", json!({ "token": token }));
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn test_refresh_for_deleted_user_is_not_found() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let token = login!(app);
    assert!(ctx.users.remove(ALICE_EMAIL).await);

    let (status, body) = post!(app, "/auth/refresh", json!({ "token": token }));
    assert_eq!(status, 404);
    assert_eq!(body["error"], "user_not_found");
}

#[actix_web::test]
async fn test_unreadable_revocation_store_fails_closed() {
    let ctx = context_with_store(Arc::new(BrokenRevocationStore { fail_reads: true })).await;
    let app = init_app!(ctx);

    let token = login!(app);
    assert!(!introspect!(app, &token));
}

#[actix_web::test]
async fn test_logout_write_failure_is_internal_error() {
    let ctx = context_with_store(Arc::new(BrokenRevocationStore { fail_reads: false })).await;
    let app = init_app!(ctx);

    let token = login!(app);
    let (status, body) = post!(app, "/auth/logout", json!({ "token": token }));
    assert_eq!(status, 500);
    assert_eq!(body["error"], "internal_error");
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}

#[actix_web::test]
async fn test_empty_token_is_rejected_by_validation() {
    let ctx = context().await;
    let app = init_app!(ctx);

    for uri in ["/auth/introspect", "/auth/logout", "/auth/refresh"] {
        let (status, body) = post!(app, uri, json!({ "token": "" }));
        assert_eq!(status, 400, "{}", uri);
        assert_eq!(body["error"], "validation_error");
    }
}
