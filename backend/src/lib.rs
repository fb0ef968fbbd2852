//! Storefront backend library.
//!
//! Exposes the application modules and the router constructor so the binary
//! and the integration tests build the exact same service.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use services::google::GoogleVerifier;
use sqlx::SqlitePool;

/// Builds the full application router with all routes and shared state.
pub fn app(pool: SqlitePool, config: Config, google: GoogleVerifier) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .nest("/products", api::product::routes::product_router())
        .nest("/reviews", api::review::routes::review_router())
        .nest("/comments", api::comment::routes::comment_router())
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(Extension(google))
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Storefront Backend",
        "version": "0.1.0"
    }))
}
