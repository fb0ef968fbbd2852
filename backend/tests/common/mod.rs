//! Shared helpers for integration tests: in-memory database, router
//! construction, and small HTTP conveniences over `tower::ServiceExt`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use backend::{app, config::Config, services::google::GoogleVerifier};
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: "test-access-secret".to_string(),
        jwt_expires_in_seconds: 900,
        refresh_token_secret: "test-refresh-secret".to_string(),
        refresh_token_expires_in_seconds: 3600,
        server_port: 0,
    }
}

/// One-connection in-memory pool; a single connection keeps every query on
/// the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");
    pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    test_app_with_google(GoogleVerifier::new()).await
}

pub async fn test_app_with_google(google: GoogleVerifier) -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let router = app(pool.clone(), test_config(), google);
    (router, pool)
}

async fn send(
    router: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    send(router, "GET", path, None, None).await
}

pub async fn post_json(router: &Router, path: &str, body: &Value) -> (StatusCode, Value) {
    send(router, "POST", path, None, Some(body)).await
}

pub async fn post_json_auth(
    router: &Router,
    path: &str,
    token: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send(router, "POST", path, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    router: &Router,
    path: &str,
    token: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send(router, "PUT", path, Some(token), Some(body)).await
}

pub async fn delete_auth(router: &Router, path: &str, token: &str) -> (StatusCode, Value) {
    send(router, "DELETE", path, Some(token), None).await
}

/// Registers a user and returns its `(access, refresh)` token pair.
pub async fn register_user(
    router: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> (String, String) {
    let (status, body) = post_json(
        router,
        "/register",
        &serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    (
        body["token"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

pub async fn promote_to_admin(pool: &SqlitePool, email: &str) {
    sqlx::query("UPDATE users SET role = 'admin' WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await
        .expect("failed to promote user");
}
