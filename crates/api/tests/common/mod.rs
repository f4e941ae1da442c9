//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router with the production middleware
//! stack and drives it through `tower::ServiceExt::oneshot`, so no TCP
//! listener is needed. Each `#[sqlx::test]` gets its own migrated
//! database.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pathos_api::auth::jwt::JwtConfig;
use pathos_api::config::ServerConfig;
use pathos_api::routes;
use pathos_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the router construction in
/// `main.rs` so tests exercise the same stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    pool: &PgPool,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    build_test_app(pool.clone())
        .oneshot(request)
        .await
        .unwrap()
}

pub async fn get(pool: &PgPool, uri: &str, token: &str) -> Response<Body> {
    send(pool, Method::GET, uri, Some(token), None).await
}

pub async fn get_unauthenticated(pool: &PgPool, uri: &str) -> Response<Body> {
    send(pool, Method::GET, uri, None, None).await
}

pub async fn post_json(
    pool: &PgPool,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(pool, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_json_unauthenticated(
    pool: &PgPool,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(pool, Method::POST, uri, None, Some(body)).await
}

pub async fn put_json(
    pool: &PgPool,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(pool, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(pool: &PgPool, uri: &str, token: &str) -> Response<Body> {
    send(pool, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up and log in a fresh user, returning their access token.
pub async fn signup_and_login(pool: &PgPool, username: &str) -> String {
    let response = post_json_unauthenticated(
        pool,
        "/api/v1/auth/signup",
        serde_json::json!({"username": username, "password": "hunter2-long"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "signup failed");

    let response = post_json_unauthenticated(
        pool,
        "/api/v1/auth/login",
        serde_json::json!({"username": username, "password": "hunter2-long"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login failed");
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Id of one of the seeded (non-custom) passions.
pub async fn seeded_passion_id(pool: &PgPool, token: &str) -> i64 {
    let response = get(pool, "/api/v1/passions", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"][0]["id"].as_i64().unwrap()
}

/// Create a project under a seeded passion, returning its id.
pub async fn create_project(pool: &PgPool, token: &str, title: &str) -> i64 {
    let passion_id = seeded_passion_id(pool, token).await;
    let response = post_json(
        pool,
        "/api/v1/projects",
        token,
        serde_json::json!({"title": title, "passion_id": passion_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "project create failed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a milestone in a project, returning its id.
pub async fn create_milestone(pool: &PgPool, token: &str, project_id: i64, title: &str) -> i64 {
    let response = post_json(
        pool,
        "/api/v1/milestones",
        token,
        serde_json::json!({"title": title, "project_id": project_id}),
    )
    .await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "milestone create failed"
    );
    body_json(response).await["id"].as_i64().unwrap()
}
