//! Integration tests for the `/projects` resource: CRUD, privacy
//! filtering, ownership isolation, and the deletion cascade.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, signup_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_with_defaults(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &token).await;

    let response = post_json(
        &pool,
        "/api/v1/projects",
        &token,
        serde_json::json!({"title": "Birdhouse", "passion_id": passion_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Birdhouse");
    assert_eq!(json["status"], "active");
    assert_eq!(json["stage"], "idea");
    assert_eq!(json["privacy"], "public");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_passion_is_not_found(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let response = post_json(
        &pool,
        "/api/v1/projects",
        &token,
        serde_json::json!({"title": "Birdhouse", "passion_id": 999_999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unjoined_custom_passion_is_forbidden(pool: PgPool) {
    let owner = signup_and_login(&pool, "mira").await;
    let created = post_json(
        &pool,
        "/api/v1/passions",
        &owner,
        serde_json::json!({"name": "Bonsai"}),
    )
    .await;
    let passion_id = body_json(created).await["id"].as_i64().unwrap();

    // A different user who never joined the custom passion.
    let other = signup_and_login(&pool, "noor").await;
    let response = post_json(
        &pool,
        "/api/v1/projects",
        &other,
        serde_json::json!({"title": "Copycat", "passion_id": passion_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn partial_update_preserves_untouched_fields(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &token).await;
    let created = post_json(
        &pool,
        "/api/v1/projects",
        &token,
        serde_json::json!({
            "title": "Birdhouse",
            "description": "cedar, two storeys",
            "passion_id": passion_id
        }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = put_json(
        &pool,
        &format!("/api/v1/projects/{id}"),
        &token,
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["title"], "Birdhouse");
    assert_eq!(json["description"], "cedar, two storeys");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn private_projects_hide_from_other_users(pool: PgPool) {
    let owner = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &owner).await;

    let public = post_json(
        &pool,
        "/api/v1/projects",
        &owner,
        serde_json::json!({"title": "Public build", "passion_id": passion_id}),
    )
    .await;
    let public_id = body_json(public).await["id"].as_i64().unwrap();

    let private = post_json(
        &pool,
        "/api/v1/projects",
        &owner,
        serde_json::json!({"title": "Secret build", "passion_id": passion_id, "privacy": "private"}),
    )
    .await;
    let private_id = body_json(private).await["id"].as_i64().unwrap();

    let viewer = signup_and_login(&pool, "noor").await;

    // Public project is visible to anyone.
    let seen = get(&pool, &format!("/api/v1/projects/{public_id}"), &viewer).await;
    assert_eq!(seen.status(), StatusCode::OK);

    // Private one reads as not-found, identical to a missing row.
    let hidden = get(&pool, &format!("/api/v1/projects/{private_id}"), &viewer).await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    // Owner still sees it.
    let own = get(&pool, &format!("/api/v1/projects/{private_id}"), &owner).await;
    assert_eq!(own.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_another_users_projects_shows_public_only(pool: PgPool) {
    let owner = signup_and_login(&pool, "mira").await;
    let passion_id = common::seeded_passion_id(&pool, &owner).await;
    for (title, privacy) in [("Shown", "public"), ("Hidden", "private")] {
        post_json(
            &pool,
            "/api/v1/projects",
            &owner,
            serde_json::json!({"title": title, "passion_id": passion_id, "privacy": privacy}),
        )
        .await;
    }
    let owner_profile = get(&pool, "/api/v1/profile", &owner).await;
    let owner_id = body_json(owner_profile).await["id"].as_i64().unwrap();

    let viewer = signup_and_login(&pool, "noor").await;
    let listed = get(
        &pool,
        &format!("/api/v1/projects?user_id={owner_id}"),
        &viewer,
    )
    .await;
    let json = body_json(listed).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Shown"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ownership_isolation_on_mutation(pool: PgPool) {
    let owner = signup_and_login(&pool, "mira").await;
    let project_id = common::create_project(&pool, &owner, "Birdhouse").await;

    let intruder = signup_and_login(&pool, "noor").await;

    let updated = put_json(
        &pool,
        &format!("/api/v1/projects/{project_id}"),
        &intruder,
        serde_json::json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::NOT_FOUND);

    let removed = delete(&pool, &format!("/api/v1/projects/{project_id}"), &intruder).await;
    assert_eq!(removed.status(), StatusCode::NOT_FOUND);

    // Untouched for the owner.
    let own = get(&pool, &format!("/api/v1/projects/{project_id}"), &owner).await;
    assert_eq!(body_json(own).await["title"], "Birdhouse");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_project_cascades_to_everything_scoped(pool: PgPool) {
    let token = signup_and_login(&pool, "mira").await;
    let project_id = common::create_project(&pool, &token, "Birdhouse").await;
    let milestone_id = common::create_milestone(&pool, &token, project_id, "Frame").await;

    let task = post_json(
        &pool,
        "/api/v1/tasks",
        &token,
        serde_json::json!({"title": "Cut wood", "project_id": project_id}),
    )
    .await;
    let task_id = body_json(task).await["id"].as_i64().unwrap();

    let entry = post_json(
        &pool,
        "/api/v1/entries",
        &token,
        serde_json::json!({"title": "Day 1", "project_id": project_id}),
    )
    .await;
    let entry_id = body_json(entry).await["id"].as_i64().unwrap();

    post_json(
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

    let removed = delete(&pool, &format!("/api/v1/projects/{project_id}"), &token).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    for uri in [
        format!("/api/v1/projects/{project_id}"),
        format!("/api/v1/milestones/{milestone_id}"),
        format!("/api/v1/tasks/{task_id}"),
        format!("/api/v1/entries/{entry_id}"),
    ] {
        let response = get(&pool, &uri, &token).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri} survived");
    }

    let times = get(&pool, "/api/v1/time-entries", &token).await;
    let json = body_json(times).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["total_minutes"], 0);
}
