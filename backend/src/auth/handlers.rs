//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (registration, login, logout, token refresh, third-party login), parse
//! request data, and interact with the `auth::service` for core business
//! logic.

use crate::api::common::{HttpError, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::services::google::GoogleVerifier;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<TokenPairResponse>), HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.register(payload).await {
        Ok(tokens) => Ok((StatusCode::CREATED, ResponseJson(tokens))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<TokenPairResponse>, HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.login(payload).await {
        Ok(tokens) => Ok(ResponseJson(tokens)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request (consumes the presented refresh token)
#[axum::debug_handler]
pub async fn logout(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<ResponseJson<LogoutResponse>, HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.logout(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request (single-use rotation)
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<ResponseJson<TokenPairResponse>, HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.refresh_token(payload).await {
        Ok(tokens) => Ok(ResponseJson(tokens)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle Google third-party login request
#[axum::debug_handler]
pub async fn google_login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(google): Extension<GoogleVerifier>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<ResponseJson<TokenPairResponse>, HttpError> {
    let auth_service = AuthService::new(&pool, &config).with_google_verifier(google);

    match auth_service.google_login(payload).await {
        Ok(tokens) => Ok(ResponseJson(tokens)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
