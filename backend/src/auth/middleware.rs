//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains logic for validating access tokens and enforcing
//! the admin role on gated endpoints.

use crate::api::common::{ErrorBody, HttpError};
use crate::config::Config;
use crate::database::models::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    Json,
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

fn unauthorized(message: &str) -> HttpError {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message)))
}

/// Access-token authentication middleware.
///
/// Verification is stateless: signature and expiry only, no store lookup.
/// On success the resolved claims are attached to the request extensions.
pub async fn require_auth(
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| unauthorized("Unauthorized: No token provided"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Unauthorized: No token provided"))?;

    let jwt_utils = JwtUtils::new(&config);

    match jwt_utils.validate_access_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(unauthorized("Unauthorized: Invalid token")),
    }
}

/// Admin role authorization middleware; must run after `require_auth`.
///
/// The role is resolved from the user record, not from the token, so a role
/// change takes effect without waiting for the access token to expire.
pub async fn require_admin(
    Extension(pool): Extension<SqlitePool>,
    request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| unauthorized("Unauthorized: No token provided"))?;

    let repo = UserRepository::new(&pool);
    match repo.get_user_by_id(&claims.sub).await {
        Ok(Some(user)) if user.role == UserRole::Admin => Ok(next.run(request).await),
        Ok(_) => Err((
            StatusCode::FORBIDDEN,
            Json(ErrorBody::new("Forbidden: Admin access required")),
        )),
        Err(error) => {
            tracing::error!(error = %error, "role lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Server error")),
            ))
        }
    }
}
