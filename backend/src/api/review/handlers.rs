//! Handler functions for review endpoints.

use crate::api::common::{HttpError, service_error_to_http};
use crate::database::models::Review;
use crate::errors::ServiceError;
use crate::repositories::review_repository::{ReviewInput, ReviewRepository};
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct PagingQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One page of reviews plus the overall count.
#[derive(Debug, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,

    #[serde(default)]
    pub images: Vec<String>,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(request: ReviewRequest) -> Self {
        ReviewInput {
            title: request.title,
            content: request.content,
            rating: request.rating,
            images: request.images,
        }
    }
}

/// List reviews newest-first with simple page/limit paging.
#[axum::debug_handler]
pub async fn list_reviews(
    Extension(pool): Extension<SqlitePool>,
    Query(paging): Query<PagingQuery>,
) -> Result<ResponseJson<ReviewPage>, HttpError> {
    let page = paging.page.unwrap_or(1).max(1);
    let limit = paging.limit.unwrap_or(10).clamp(1, 100);

    let repo = ReviewRepository::new(&pool);
    match repo.list_paged(page, limit).await {
        Ok((reviews, total)) => Ok(ResponseJson(ReviewPage { reviews, total })),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Retrieve a review by id.
#[axum::debug_handler]
pub async fn get_review(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<Review>, HttpError> {
    let repo = ReviewRepository::new(&pool);

    match repo.get(&id).await {
        Ok(Some(review)) => Ok(ResponseJson(review)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("Review", &id))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// List all reviews written by one user.
#[axum::debug_handler]
pub async fn get_reviews_by_user(
    Extension(pool): Extension<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<ResponseJson<Vec<Review>>, HttpError> {
    let repo = ReviewRepository::new(&pool);

    match repo.get_by_user(&user_id).await {
        Ok(reviews) => Ok(ResponseJson(reviews)),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Create a review authored by the authenticated user.
#[axum::debug_handler]
pub async fn create_review(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, ResponseJson<Review>), HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    let repo = ReviewRepository::new(&pool);
    match repo.create(&claims.sub, payload.into()).await {
        Ok(review) => Ok((StatusCode::CREATED, ResponseJson(review))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Replace a review's fields.
#[axum::debug_handler]
pub async fn update_review(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<ResponseJson<Review>, HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    let repo = ReviewRepository::new(&pool);
    match repo.update(&id, payload.into()).await {
        Ok(Some(review)) => Ok(ResponseJson(review)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("Review", &id))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Delete a review.
#[axum::debug_handler]
pub async fn delete_review(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<serde_json::Value>, HttpError> {
    let repo = ReviewRepository::new(&pool);

    match repo.delete(&id).await {
        Ok(true) => Ok(ResponseJson(serde_json::json!({
            "message": "Item deleted successfully"
        }))),
        Ok(false) => Err(service_error_to_http(ServiceError::not_found("Review", &id))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Toggle the authenticated user's like on a review.
#[axum::debug_handler]
pub async fn toggle_like(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<Review>, HttpError> {
    let repo = ReviewRepository::new(&pool);

    match repo.toggle_like(&id, &claims.sub).await {
        Ok(Some(review)) => Ok(ResponseJson(review)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("Review", &id))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}
