//! Error response shape across the API.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, monitor_token};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/api/v1/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_plant_returns_json_error(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = monitor_token(&test).await;

    let response = get_auth(test.app(), "/api/v1/plants/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Plant with id 999999 not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_device_names_its_key(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = monitor_token(&test).await;

    let response = get_auth(test.app(), "/api/v1/devices/esp-404", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Device with id esp-404 not found");
}

/// Malformed JSON is rejected by the extractor before reaching the handler.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_json_is_client_error(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = monitor_token(&test).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/plants")
        .header(CONTENT_TYPE, "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from("{not json"))
        .unwrap();
    let response = test.app().oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_numeric_plant_id_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);
    let token = monitor_token(&test).await;

    let response = get_auth(test.app(), "/api/v1/plants/not-a-number", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
