//! Integration tests for the `/tasks` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_milestone, create_project, get, post_json, put_json,
             signup_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn task_inherits_its_milestones_project(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &token, "Birdhouse").await;
    let milestone_id = create_milestone(&pool, &token, project_id, "Frame").await;

    let response = post_json(
        &pool,
        "/api/v1/tasks",
        &token,
        serde_json::json!({"title": "Cut wood", "milestone_id": milestone_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["project_id"].as_i64(), Some(project_id));
    assert_eq!(json["milestone_id"].as_i64(), Some(milestone_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn milestone_outside_the_project_is_rejected(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_a = create_project(&pool, &token, "Birdhouse").await;
    let project_b = create_project(&pool, &token, "Quilt").await;
    let milestone_b = create_milestone(&pool, &token, project_b, "Border").await;

    let response = post_json(
        &pool,
        "/api/v1/tasks",
        &token,
        serde_json::json!({
            "title": "Cut wood",
            "project_id": project_a,
            "milestone_id": milestone_b
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggling_completed_is_symmetric_with_the_timestamp(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &token, "Birdhouse").await;
    let created = post_json(
        &pool,
        "/api/v1/tasks",
        &token,
        serde_json::json!({"title": "Cut wood", "project_id": project_id}),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let before = chrono::Utc::now();
    let done = put_json(
        &pool,
        &format!("/api/v1/tasks/{id}"),
        &token,
        serde_json::json!({"completed": true}),
    )
    .await;
    let json = body_json(done).await;
    assert_eq!(json["completed"], true);
    let stamped: chrono::DateTime<chrono::Utc> =
        json["completed_at"].as_str().unwrap().parse().unwrap();
    assert!(stamped >= before);

    // Toggling back returns the timestamp to null.
    let undone = put_json(
        &pool,
        &format!("/api/v1/tasks/{id}"),
        &token,
        serde_json::json!({"completed": false}),
    )
    .await;
    let json = body_json(undone).await;
    assert_eq!(json["completed"], false);
    assert!(json["completed_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completed_filter_and_lenient_pagination(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = create_project(&pool, &token, "Birdhouse").await;

    let mut ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let resp = post_json(
            &pool,
            "/api/v1/tasks",
            &token,
            serde_json::json!({"title": title, "project_id": project_id}),
        )
        .await;
        ids.push(body_json(resp).await["id"].as_i64().unwrap());
    }
    put_json(
        &pool,
        &format!("/api/v1/tasks/{}", ids[1]),
        &token,
        serde_json::json!({"completed": true}),
    )
    .await;

    let done = get(&pool, "/api/v1/tasks?completed=true", &token).await;
    let json = body_json(done).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Two");

    // A garbage limit falls back to the default instead of erroring.
    let listed = get(&pool, "/api/v1/tasks?limit=abc&offset=junk", &token).await;
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_json(listed).await["data"].as_array().unwrap().len(), 3);
}
