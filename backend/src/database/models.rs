//! Data structures mapping directly to database tables.
//!
//! Row types derive `sqlx::FromRow` and mirror the column layout; list-valued
//! fields (sizes, images, tags, ...) are stored as JSON text and converted to
//! proper vectors in the API-facing types defined alongside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to a user record. A flat attribute check, not a policy
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Identity record. The refresh-token set lives in its own table
/// (`refresh_tokens`), not on this row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
    /// JSON text: street/city/zipCode/country.
    pub address: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for inserting a new user row.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

/// Raw product row; JSON-encoded list columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub category: String,
    pub sizes: String,
    pub colors: String,
    pub images: String,
    pub stock: i64,
    pub tags: String,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog product as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub stock: i64,
    pub tags: Vec<String>,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            brand: row.brand,
            description: row.description,
            price: row.price,
            sale_price: row.sale_price,
            category: row.category,
            sizes: parse_list(&row.sizes),
            colors: parse_list(&row.colors),
            images: parse_list(&row.images),
            stock: row.stock,
            tags: parse_list(&row.tags),
            gender: row.gender,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub rating: i64,
    pub images: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review as exposed over the API, including the ids of users that liked it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub rating: i64,
    pub images: Vec<String>,
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewRow {
    pub fn into_review(self, likes: Vec<String>) -> Review {
        Review {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            rating: self.rating,
            images: parse_list(&self.images),
            likes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub review_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_tolerates_bad_json() {
        assert_eq!(parse_list(r#"["s","m"]"#), vec!["s", "m"]);
        assert!(parse_list("not json").is_empty());
        assert!(parse_list("").is_empty());
    }
}
