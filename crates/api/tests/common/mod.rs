#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use academy_api::auth::jwt::JwtConfig;
use academy_api::auth::password::hash_password;
use academy_api::config::ServerConfig;
use academy_api::router::build_app_router;
use academy_api::state::AppState;
use academy_db::models::access_code::AccessCode;
use academy_db::repositories::AccessCodeRepo;

/// Plaintext admin password matching [`test_config`]'s hash.
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            admin_token_expiry_mins: 60,
            learner_token_expiry_days: 30,
        },
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an active access code directly.
pub async fn seed_code(pool: &PgPool, code: &str, customer_name: &str) -> AccessCode {
    AccessCodeRepo::create(pool, code, customer_name, "555-0100")
        .await
        .expect("access code creation should succeed")
}

/// Redeem `code` via the API and return the learner token.
pub async fn redeem(app: Router, code: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/access/redeem",
        serde_json::json!({ "code": code }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "redeem should succeed");
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Log in as administrator and return the admin token.
pub async fn admin_token(app: Router) -> String {
    let response = post_json(
        app,
        "/api/v1/admin/login",
        serde_json::json!({ "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "admin login should succeed");
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}
