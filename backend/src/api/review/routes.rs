//! Defines the HTTP routes for reviews.
//!
//! Reads are public; writes and likes require authentication.

use super::handlers::*;
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn review_router() -> Router {
    let public = Router::new()
        .route("/", get(list_reviews))
        .route("/user/{user_id}", get(get_reviews_by_user))
        .route("/{id}", get(get_review));

    let protected = Router::new()
        .route("/", post(create_review))
        .route("/{id}", put(update_review).delete(delete_review))
        .route("/{id}/like", post(toggle_like))
        .layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
