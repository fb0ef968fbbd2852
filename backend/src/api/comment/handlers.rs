//! Handler functions for comment endpoints.

use crate::api::common::{HttpError, service_error_to_http};
use crate::database::models::Comment;
use crate::errors::ServiceError;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFilter {
    pub review_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Review id is required"))]
    pub review_id: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// List comments, optionally for a single review.
#[axum::debug_handler]
pub async fn list_comments(
    Extension(pool): Extension<SqlitePool>,
    Query(filter): Query<CommentFilter>,
) -> Result<ResponseJson<Vec<Comment>>, HttpError> {
    let repo = CommentRepository::new(&pool);

    match repo.list(filter.review_id.as_deref()).await {
        Ok(comments) => Ok(ResponseJson(comments)),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Create a comment on a review, authored by the authenticated user.
#[axum::debug_handler]
pub async fn create_comment(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, ResponseJson<Comment>), HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    // The review must exist before we attach a comment to it.
    let review_repo = ReviewRepository::new(&pool);
    match review_repo.get(&payload.review_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(service_error_to_http(ServiceError::not_found(
                "Review",
                &payload.review_id,
            )));
        }
        Err(error) => return Err(service_error_to_http(ServiceError::from(error))),
    }

    let repo = CommentRepository::new(&pool);
    match repo
        .create(&claims.sub, &payload.review_id, &payload.content)
        .await
    {
        Ok(comment) => Ok((StatusCode::CREATED, ResponseJson(comment))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Update a comment's content.
#[axum::debug_handler]
pub async fn update_comment(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<ResponseJson<Comment>, HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    let repo = CommentRepository::new(&pool);
    match repo.update(&id, &payload.content).await {
        Ok(Some(comment)) => Ok(ResponseJson(comment)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found(
            "Comment", &id,
        ))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Delete a comment.
#[axum::debug_handler]
pub async fn delete_comment(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<serde_json::Value>, HttpError> {
    let repo = CommentRepository::new(&pool);

    match repo.delete(&id).await {
        Ok(true) => Ok(ResponseJson(serde_json::json!({
            "message": "Item deleted successfully"
        }))),
        Ok(false) => Err(service_error_to_http(ServiceError::not_found(
            "Comment", &id,
        ))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}
