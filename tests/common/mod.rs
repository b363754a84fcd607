//! Shared setup for integration tests: a fresh SQLite database per test.

#![allow(dead_code, unused_macros)]

use std::sync::{Arc, Once};

use tempfile::TempDir;

use shortmark::config::{get_config, init_config};
use shortmark::runtime::lifetime::startup::StartupContext;
use shortmark::storage::SeaOrmStorage;

static INIT: Once = Once::new();

pub struct TestEnv {
    pub ctx: StartupContext,
    _dir: TempDir,
}

pub async fn setup() -> TestEnv {
    INIT.call_once(init_config);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("shortmark_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    let ctx = StartupContext::from_storage(storage, &get_config());

    TestEnv { ctx, _dir: dir }
}

/// Build the full application around a [`TestEnv`]
macro_rules! test_app {
    ($env:expr) => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(shortmark::api::middleware::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new($env.ctx.user_service.clone()))
                .app_data(actix_web::web::Data::new($env.ctx.auth_service.clone()))
                .app_data(actix_web::web::Data::new($env.ctx.bookmark_service.clone()))
                .configure(shortmark::api::services::configure_routes),
        )
        .await
    }};
}

/// Register a user and log in, returning `(access, refresh)`
macro_rules! register_and_login {
    ($app:expr, $username:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({
                "username": $username,
                "email": $email,
                "password": $password,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        (
            body["user"]["access"].as_str().unwrap().to_string(),
            body["user"]["refresh"].as_str().unwrap().to_string(),
        )
    }};
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
