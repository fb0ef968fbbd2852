//! Main entry point for the storefront backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware.

use backend::app;
use backend::config::Config;
use backend::database::Database;
use backend::services::google::GoogleVerifier;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    let app = app(pool, config.clone(), GoogleVerifier::new());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting storefront server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}
