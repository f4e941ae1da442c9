//! Integration tests for the `/time-entries` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, get, post_json, signup_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn duration_is_computed_from_the_range(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &token, "Birdhouse").await;

    let response = post_json(
        &pool,
        "/api/v1/time-entries",
        &token,
        serde_json::json!({
            "project_id": project_id,
            "started_at": "2025-06-01T10:00:00Z",
            "ended_at": "2025-06-01T10:45:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["duration_minutes"], 45);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn end_before_start_is_rejected(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let response = post_json(
        &pool,
        "/api/v1/time-entries",
        &token,
        serde_json::json!({
            "started_at": "2025-06-01T10:45:00Z",
            "ended_at": "2025-06-01T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_duration_is_rejected(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    for duration in [0, 2000] {
        let response = post_json(
            &pool,
            "/api/v1/time-entries",
            &token,
            serde_json::json!({
                "duration": duration,
                "started_at": "2025-06-01T10:00:00Z",
                "ended_at": "2025-06-01T10:45:00Z"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duration_disagreeing_with_the_range_is_rejected(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let response = post_json(
        &pool,
        "/api/v1/time-entries",
        &token,
        serde_json::json!({
            "duration": 30,
            "started_at": "2025-06-01T10:00:00Z",
            "ended_at": "2025-06-01T10:45:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_references_read_as_not_found(pool: PgPool) {
    let owner = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &owner, "Birdhouse").await;

    let intruder = signup_and_login(&pool, "noor").await;
    let response = post_json(
        &pool,
        "/api/v1/time-entries",
        &intruder,
        serde_json::json!({
            "project_id": project_id,
            "started_at": "2025-06-01T10:00:00Z",
            "ended_at": "2025-06-01T10:45:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_sums_total_minutes(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &token, "Birdhouse").await;

    for (start, end) in [
        ("2025-06-01T10:00:00Z", "2025-06-01T10:45:00Z"),
        ("2025-06-02T09:00:00Z", "2025-06-02T09:30:00Z"),
    ] {
        let response = post_json(
            &pool,
            "/api/v1/time-entries",
            &token,
            serde_json::json!({
                "project_id": project_id,
                "started_at": start,
                "ended_at": end
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = get(&pool, "/api/v1/time-entries", &token).await;
    let json = body_json(listed).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["total_minutes"], 75);
    // Most recent first.
    assert_eq!(json["time_entries"][0]["duration_minutes"], 30);
}
