//! Defines the HTTP routes for the product catalog.
//!
//! Reads are public; create/update/delete are admin-gated.

use super::handlers::*;
use crate::auth::middleware::{require_admin, require_auth};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn product_router() -> Router {
    let public = Router::new()
        .route("/", get(list_products))
        .route("/search", get(search_products))
        .route("/{id}", get(get_product));

    let admin = Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(require_auth));

    public.merge(admin)
}
