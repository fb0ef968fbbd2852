//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login, logout, token refreshing and
//! third-party login. They are mounted at the router root.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh-token", post(refresh_token))
        .route("/google", post(google_login))
}
