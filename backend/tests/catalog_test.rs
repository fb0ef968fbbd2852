//! Integration tests for the catalog and community endpoints: product CRUD
//! and search, reviews with paging and likes, and comments.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

async fn admin_token(app: &axum::Router, pool: &sqlx::SqlitePool) -> String {
    let (token, _r) = register_user(app, "admin", "admin@example.com", "Secret1!").await;
    promote_to_admin(pool, "admin@example.com").await;
    token
}

#[tokio::test]
async fn product_crud_round_trip() {
    let (app, pool) = test_app().await;
    let token = admin_token(&app, &pool).await;

    let (status, created) = post_json_auth(
        &app,
        "/products",
        &token,
        &json!({
            "name": "Wool Coat",
            "brand": "OA",
            "description": "Winter coat",
            "price": 120.0,
            "salePrice": 99.0,
            "category": "coats",
            "sizes": ["s", "m", "l"],
            "colors": ["navy"],
            "stock": 12,
            "tags": ["winter", "wool"],
            "gender": "women"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["sizes"], json!(["s", "m", "l"]));

    let (status, fetched) = get(&app, &format!("/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], json!("Wool Coat"));
    assert_eq!(fetched["gender"], json!("women"));

    let (status, updated) = put_json_auth(
        &app,
        &format!("/products/{id}"),
        &token,
        &json!({
            "name": "Wool Coat",
            "brand": "OA",
            "description": "Warm winter coat",
            "price": 110.0,
            "category": "coats",
            "stock": 10,
            "gender": "women"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], json!("Warm winter coat"));

    let (status, _) = delete_auth(&app, &format!("/products/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_listing_filters_and_search() {
    let (app, pool) = test_app().await;
    let token = admin_token(&app, &pool).await;

    for (name, category, gender, tags) in [
        ("Linen Shirt", "shirts", "men", json!(["summer"])),
        ("Silk Dress", "dresses", "women", json!(["evening"])),
        ("Canvas Tote", "bags", "unisex", json!(["everyday", "canvas"])),
    ] {
        let (status, _) = post_json_auth(
            &app,
            "/products",
            &token,
            &json!({
                "name": name,
                "brand": "OA",
                "description": format!("{name} description"),
                "price": 50.0,
                "category": category,
                "stock": 5,
                "tags": tags,
                "gender": gender
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, women) = get(&app, "/products?gender=women").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(women.as_array().unwrap().len(), 1);
    assert_eq!(women[0]["name"], json!("Silk Dress"));

    let (status, bags) = get(&app, "/products?category=bags&gender=unisex").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bags.as_array().unwrap().len(), 1);

    // Matches name and tag text.
    let (status, hits) = get(&app, "/products/search?q=canvas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["name"], json!("Canvas Tote"));

    let (status, _) = get(&app, "/products/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_paging_and_likes() {
    let (app, _pool) = test_app().await;
    let (token, _r) = register_user(&app, "reviewer", "reviewer@example.com", "Secret1!").await;

    for i in 0..3 {
        let (status, _) = post_json_auth(
            &app,
            "/reviews",
            &token,
            &json!({
                "title": format!("Review {i}"),
                "content": "Fits well",
                "rating": 4
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = get(&app, "/reviews?page=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], json!(3));
    assert_eq!(page["reviews"].as_array().unwrap().len(), 2);

    let review_id = page["reviews"][0]["id"].as_str().unwrap().to_string();

    // Like, then unlike.
    let (status, liked) =
        post_json_auth(&app, &format!("/reviews/{review_id}/like"), &token, &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["likes"].as_array().unwrap().len(), 1);

    let (status, unliked) =
        post_json_auth(&app, &format!("/reviews/{review_id}/like"), &token, &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(unliked["likes"].as_array().unwrap().is_empty());

    let user_id = page["reviews"][0]["userId"].as_str().unwrap().to_string();
    let (status, by_user) = get(&app, &format!("/reviews/user/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_user.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn review_rating_must_be_in_range() {
    let (app, _pool) = test_app().await;
    let (token, _r) = register_user(&app, "rater", "rater@example.com", "Secret1!").await;

    let (status, _) = post_json_auth(
        &app,
        "/reviews",
        &token,
        &json!({"title": "t", "content": "c", "rating": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comments_attach_to_existing_reviews_only() {
    let (app, _pool) = test_app().await;
    let (token, _r) = register_user(&app, "commenter", "commenter@example.com", "Secret1!").await;

    let (status, review) = post_json_auth(
        &app,
        "/reviews",
        &token,
        &json!({"title": "Great", "content": "Loved it", "rating": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let review_id = review["id"].as_str().unwrap().to_string();

    let (status, comment) = post_json_auth(
        &app,
        "/comments",
        &token,
        &json!({"reviewId": review_id, "content": "Agreed!"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let (status, _) = post_json_auth(
        &app,
        "/comments",
        &token,
        &json!({"reviewId": "missing-review", "content": "Hello"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listed) = get(&app, &format!("/comments?reviewId={review_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = put_json_auth(
        &app,
        &format!("/comments/{comment_id}"),
        &token,
        &json!({"content": "Changed my mind"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], json!("Changed my mind"));

    let (status, _) = delete_auth(&app, &format!("/comments/{comment_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) = get(&app, &format!("/comments?reviewId={review_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}
