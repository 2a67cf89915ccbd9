//! Integration tests for Todo API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    routes::create_router(AppState::new(db), false, CancellationToken::new())
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

/// Helper to create a todo and return its ID
async fn create_todo(app: &axum::Router, body: Value) -> String {
    let (status, created) = send(app, "POST", "/todos", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn create_todo_returns_created_with_defaults() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/todos", Some(json!({"title": "Buy milk"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["completed"], false);
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["tags"], json!([]));
    assert!(body["description"].is_null());
    assert!(body["due_date"].is_null());
    assert_eq!(body["id"].as_str().unwrap().len(), 12);
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_round_trips_fields() {
    let app = test_app().await;

    let id = create_todo(
        &app,
        json!({
            "title": "Plan trip",
            "description": "Book flights",
            "priority": "high",
            "due_date": "2025-07-01",
            "tags": ["travel", "summer"],
        }),
    )
    .await;

    let (status, body) = send(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["description"], "Book flights");
    assert_eq!(body["priority"], "high");
    assert_eq!(body["tags"], json!(["travel", "summer"]));
    assert!(body["due_date"].as_str().unwrap().starts_with("2025-07-01T00:00:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_todo_validation_errors_are_bad_request() {
    let app = test_app().await;

    for body in [
        json!({"title": ""}),
        json!({"title": "x".repeat(201)}),
        json!({"title": "t", "description": "d".repeat(1001)}),
        json!({"title": "t", "priority": "urgent"}),
        json!({"title": "t", "due_date": "someday"}),
        json!({"description": "missing title"}),
    ] {
        let (status, response) = send(&app, "POST", "/todos", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(response["error"].as_str().is_some());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_todo_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/todos/nonexistent-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nonexistent-id"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_todos_paginates_newest_first() {
    let app = test_app().await;
    for i in 0..12 {
        create_todo(&app, json!({"title": format!("todo {}", i)})).await;
    }

    let (status, body) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["has_prev"], false);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["items"][0]["title"], "todo 11");

    let (_, body) = send(&app, "GET", "/todos?page=2&limit=10", None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["has_next"], false);
    assert_eq!(body["has_prev"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_todos_rejects_bad_query_parameters() {
    let app = test_app().await;

    for uri in [
        "/todos?page=0",
        "/todos?limit=0",
        "/todos?limit=101",
        "/todos?page=abc",
        "/todos?completed=maybe",
        "/todos?priority=urgent",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn list_todos_filters() {
    let app = test_app().await;
    create_todo(&app, json!({"title": "Buy milk", "priority": "high", "tags": ["shopping"]})).await;
    create_todo(&app, json!({"title": "Write report", "tags": ["work"], "completed": true})).await;

    let (_, body) = send(&app, "GET", "/todos?search=milk", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Buy milk");

    let (_, body) = send(&app, "GET", "/todos?search=bread", None).await;
    assert_eq!(body["total"], 0);

    let (_, body) = send(&app, "GET", "/todos?priority=high", None).await;
    assert_eq!(body["total"], 1);

    let (_, body) = send(&app, "GET", "/todos?completed=true", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Write report");

    let (_, body) = send(&app, "GET", "/todos?tag=work&completed=false", None).await;
    assert_eq!(body["total"], 0);

    let (_, body) = send(&app, "GET", "/todos?tag=&search=", None).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_todo_applies_partial_changes() {
    let app = test_app().await;
    let id = create_todo(
        &app,
        json!({"title": "Draft", "description": "first pass", "due_date": "2025-01-31"}),
    )
    .await;
    let (_, before) = send(&app, "GET", &format!("/todos/{}", id), None).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/todos/{}", id),
        Some(json!({"title": "Final", "due_date": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Final");
    assert_eq!(body["description"], "first pass");
    assert!(body["due_date"].is_null());
    assert_eq!(body["created_at"], before["created_at"]);
    assert_ne!(body["updated_at"], before["updated_at"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_todo_errors() {
    let app = test_app().await;
    let id = create_todo(&app, json!({"title": "Keep"})).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/todos/nonexistent-id",
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/todos/{}", id),
        Some(json!({"priority": "urgent"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(body["priority"], "medium");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_todo_confirms_then_not_found() {
    let app = test_app().await;
    let id = create_todo(&app, json!({"title": "Temporary"})).await;

    let (status, body) = send(&app, "DELETE", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert!(body["message"].as_str().is_some());

    let (status, _) = send(&app, "GET", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_todo_flips_completion() {
    let app = test_app().await;
    let id = create_todo(&app, json!({"title": "Flip"})).await;

    let (status, body) = send(&app, "PATCH", &format!("/todos/{}/toggle", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);

    let (_, body) = send(&app, "PATCH", &format!("/todos/{}/toggle", id), None).await;
    assert_eq!(body["completed"], false);

    let (status, _) = send(&app, "PATCH", "/todos/nonexistent-id/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_pending_and_tag_views() {
    let app = test_app().await;
    let urgent = create_todo(&app, json!({"title": "Ship", "tags": ["work", "urgent"]})).await;
    let done = create_todo(&app, json!({"title": "Done", "tags": ["work"]})).await;
    send(&app, "PATCH", &format!("/todos/{}/toggle", done), None).await;

    let (status, body) = send(&app, "GET", "/todos/completed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], done);

    let (_, body) = send(&app, "GET", "/todos/pending", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], urgent);

    let (_, body) = send(&app, "GET", "/todos/tag/urgent", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], urgent);

    let (_, body) = send(&app, "GET", "/todos/tag/work?limit=1", None).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_pages"], 2);

    let (status, _) = send(&app, "GET", "/todos/pending?limit=500", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_500_without_driver_details() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db.close().await;
    let app = routes::create_router(AppState::new(db), false, CancellationToken::new());

    let (status, body) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal store error"}));

    let (status, body) = send(&app, "POST", "/todos", Some(json!({"title": "Lost"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal store error");

    let (status, _) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
