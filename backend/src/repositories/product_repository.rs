//! Database repository for catalog products.

use crate::database::models::{Gender, Product, ProductRow};
use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, brand, description, price, sale_price, category, sizes, \
                               colors, images, stock, tags, gender, created_at, updated_at";

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
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
}

fn encode_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists products, optionally narrowed by category and/or gender.
    pub async fn list(
        &self,
        category: Option<&str>,
        gender: Option<Gender>,
    ) -> Result<Vec<Product>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1"));

        if let Some(category) = category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(gender) = gender {
            builder.push(" AND gender = ").push_bind(gender);
        }
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Substring search over name, description, brand and tags.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE name LIKE ? OR description LIKE ? OR brand LIKE ? OR tags LIKE ? \
             ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (id, name, brand, description, price, sale_price, category, \
             sizes, colors, images, stock, tags, gender, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(Uuid::now_v7().to_string())
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.sale_price)
            .bind(&input.category)
            .bind(encode_list(&input.sizes))
            .bind(encode_list(&input.colors))
            .bind(encode_list(&input.images))
            .bind(input.stock)
            .bind(encode_list(&input.tags))
            .bind(input.gender)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(Product::from(row))
    }

    /// Replaces the product's fields; returns `None` if the id is unknown.
    pub async fn update(&self, id: &str, input: ProductInput) -> Result<Option<Product>> {
        let sql = format!(
            "UPDATE products SET name = ?, brand = ?, description = ?, price = ?, \
             sale_price = ?, category = ?, sizes = ?, colors = ?, images = ?, stock = ?, \
             tags = ?, gender = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.sale_price)
            .bind(&input.category)
            .bind(encode_list(&input.sizes))
            .bind(encode_list(&input.colors))
            .bind(encode_list(&input.images))
            .bind(input.stock)
            .bind(encode_list(&input.tags))
            .bind(input.gender)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
