//! Handler functions for catalog product endpoints.

use crate::api::common::{ErrorBody, HttpError, service_error_to_http};
use crate::database::models::{Gender, Product};
use crate::errors::ServiceError;
use crate::repositories::product_repository::{ProductInput, ProductRepository};
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub gender: Option<Gender>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Product payload for create and full-replace update.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    pub sale_price: Option<f64>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub sizes: Vec<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub tags: Vec<String>,

    pub gender: Gender,
}

impl From<ProductRequest> for ProductInput {
    fn from(request: ProductRequest) -> Self {
        ProductInput {
            name: request.name,
            brand: request.brand,
            description: request.description,
            price: request.price,
            sale_price: request.sale_price,
            category: request.category,
            sizes: request.sizes,
            colors: request.colors,
            images: request.images,
            stock: request.stock,
            tags: request.tags,
            gender: request.gender,
        }
    }
}

/// List products, optionally filtered by category and/or gender.
#[axum::debug_handler]
pub async fn list_products(
    Extension(pool): Extension<SqlitePool>,
    Query(filter): Query<ProductFilter>,
) -> Result<ResponseJson<Vec<Product>>, HttpError> {
    let repo = ProductRepository::new(&pool);

    match repo.list(filter.category.as_deref(), filter.gender).await {
        Ok(products) => Ok(ResponseJson(products)),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Search products by name, description, brand or tags.
#[axum::debug_handler]
pub async fn search_products(
    Extension(pool): Extension<SqlitePool>,
    Query(query): Query<SearchQuery>,
) -> Result<ResponseJson<Vec<Product>>, HttpError> {
    let q = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => q.trim().to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorBody::new("Search query is required")),
            ));
        }
    };

    let repo = ProductRepository::new(&pool);
    match repo.search(&q).await {
        Ok(products) => Ok(ResponseJson(products)),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Retrieve a product by id.
#[axum::debug_handler]
pub async fn get_product(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<Product>, HttpError> {
    let repo = ProductRepository::new(&pool);

    match repo.get(&id).await {
        Ok(Some(product)) => Ok(ResponseJson(product)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found(
            "Product", &id,
        ))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Create a product (admin only).
#[axum::debug_handler]
pub async fn create_product(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, ResponseJson<Product>), HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    let repo = ProductRepository::new(&pool);
    match repo.create(payload.into()).await {
        Ok(product) => Ok((StatusCode::CREATED, ResponseJson(product))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Replace a product's fields (admin only).
#[axum::debug_handler]
pub async fn update_product(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<ProductRequest>,
) -> Result<ResponseJson<Product>, HttpError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(service_error_to_http(ServiceError::from_validation(
            validation_errors,
        )));
    }

    let repo = ProductRepository::new(&pool);
    match repo.update(&id, payload.into()).await {
        Ok(Some(product)) => Ok(ResponseJson(product)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found(
            "Product", &id,
        ))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}

/// Delete a product (admin only).
#[axum::debug_handler]
pub async fn delete_product(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<serde_json::Value>, HttpError> {
    let repo = ProductRepository::new(&pool);

    match repo.delete(&id).await {
        Ok(true) => Ok(ResponseJson(serde_json::json!({
            "message": "Item deleted successfully"
        }))),
        Ok(false) => Err(service_error_to_http(ServiceError::not_found(
            "Product", &id,
        ))),
        Err(error) => Err(service_error_to_http(ServiceError::from(error))),
    }
}
