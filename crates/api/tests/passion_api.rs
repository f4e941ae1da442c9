//! Integration tests for the passion taxonomy and memberships.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, signup_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_includes_seeded_taxonomy(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let response = get(&pool, "/api/v1/passions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert!(slugs.contains(&"coding"));
    assert!(slugs.contains(&"painting"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn identical_names_get_numeric_slug_suffixes(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let response = post_json(
            &pool,
            "/api/v1/passions",
            &token,
            serde_json::json!({"name": "Art"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        slugs.push(body_json(response).await["slug"].as_str().unwrap().to_string());
    }

    assert_eq!(slugs, vec!["art", "art-1", "art-2"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn creator_is_joined_to_their_custom_passion(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let created = post_json(
        &pool,
        "/api/v1/passions",
        &token,
        serde_json::json!({"name": "Bonsai"}),
    )
    .await;
    let passion_id = body_json(created).await["id"].as_i64().unwrap();

    let response = get(&pool, "/api/v1/user/passions", &token).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&passion_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn joining_twice_is_a_conflict(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &token).await;

    let first = post_json(
        &pool,
        "/api/v1/user/passions",
        &token,
        serde_json::json!({"passion_id": passion_id}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        &pool,
        "/api/v1/user/passions",
        &token,
        serde_json::json!({"passion_id": passion_id}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn leaving_a_passion(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &token).await;

    post_json(
        &pool,
        "/api/v1/user/passions",
        &token,
        serde_json::json!({"passion_id": passion_id}),
    )
    .await;

    let removed = delete(&pool, &format!("/api/v1/user/passions/{passion_id}"), &token).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let again = delete(&pool, &format!("/api/v1/user/passions/{passion_id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
