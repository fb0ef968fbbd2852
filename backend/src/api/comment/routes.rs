//! Defines the HTTP routes for comments.
//!
//! Listing is public; create/update/delete require authentication.

use super::handlers::*;
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn comment_router() -> Router {
    let public = Router::new().route("/", get(list_comments));

    let protected = Router::new()
        .route("/", post(create_comment))
        .route("/{id}", put(update_comment).delete(delete_comment))
        .layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
