//! Handler tests for the Items domain
//!
//! These drive the items router against an in-memory SQLite store:
//! - Request deserialization and validation
//! - Response bodies and HTTP status codes
//! - Error responses
//!
//! The router is mounted at `/items` exactly as the service mounts it.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_items::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

async fn app() -> (TestDatabase, Router) {
    let db = TestDatabase::new().await;
    let repo = SqliteItemRepository::new(db.connection());
    repo.init_schema().await.unwrap();
    let service = ItemService::new(repo);
    let app = Router::new().nest("/items", handlers::router(service));
    (db, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_item_lifecycle() {
    let (_db, app) = app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/items",
        Some(json!({ "name": "Test Item", "description": "A test item" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({ "id": 1, "name": "Test Item", "description": "A test item" })
    );

    let (status, item) = send(&app, "GET", "/items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "Test Item");
    assert_eq!(item["description"], "A test item");
    assert!(item["createdAt"].is_string());
    assert!(item["updatedAt"].is_string());

    let (status, body) = send(
        &app,
        "PUT",
        "/items/1",
        Some(json!({ "name": "Updated", "description": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Item updated successfully" }));

    let (_, item) = send(&app, "GET", "/items/1", None).await;
    assert_eq!(item["name"], "Updated");
    assert_eq!(item["description"], "x");

    let (status, body) = send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", "/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Item not found" }));
}

#[tokio::test]
async fn test_create_duplicate_name_is_rejected() {
    let (_db, app) = app().await;

    let (status, _) = send(&app, "POST", "/items", Some(json!({ "name": "Unique Item" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/items", Some(json!({ "name": "Unique Item" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Item with this name already exists" }));

    let (_, page) = send(&app, "GET", "/items", None).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn test_create_requires_name() {
    let (_db, app) = app().await;

    for payload in [json!({}), json!({ "name": null }), json!({ "name": "", "description": "d" })] {
        let (status, body) = send(&app, "POST", "/items", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Name is required" }));
    }

    let (_, page) = send(&app, "GET", "/items", None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_create_defaults_description() {
    let (_db, app) = app().await;

    let (status, created) = send(&app, "POST", "/items", Some(json!({ "name": "Bare" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], "");

    let (_, item) = send(&app, "GET", "/items/1", None).await;
    assert_eq!(item["description"], "");
}

#[tokio::test]
async fn test_list_paginates_in_id_order() {
    let (_db, app) = app().await;
    let builder = TestDataBuilder::from_test_name("list_paginates");

    for name in builder.names("item", 5) {
        send(&app, "POST", "/items", Some(json!({ "name": name }))).await;
    }

    let (status, page) = send(&app, "GET", "/items?page=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 5);
    assert_eq!(page["page"], 2);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["totalPages"], 3);

    let ids: Vec<i64> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);

    let (_, last) = send(&app, "GET", "/items?page=3&limit=2", None).await;
    assert_eq!(last["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_defaults_and_coerces_paging() {
    let (_db, app) = app().await;

    let (_, page) = send(&app, "GET", "/items", None).await;
    assert_eq!(page, json!({ "total": 0, "page": 1, "limit": 10, "totalPages": 0, "data": [] }));

    let (_, page) = send(&app, "GET", "/items?page=0&limit=-5", None).await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 1);

    let (_, page) = send(&app, "GET", "/items?page=abc&limit=3xyz", None).await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 3);
}

#[tokio::test]
async fn test_list_filters_by_substring() {
    let (_db, app) = app().await;

    for (name, description) in [
        ("Red Widget", "small and round"),
        ("Blue Widget", "large and round"),
        ("Red Gadget", "small and square"),
    ] {
        send(
            &app,
            "POST",
            "/items",
            Some(json!({ "name": name, "description": description })),
        )
        .await;
    }

    let (_, page) = send(&app, "GET", "/items?name=Widget", None).await;
    assert_eq!(page["total"], 2);

    let (_, page) = send(&app, "GET", "/items?name=red&description=small", None).await;
    assert_eq!(page["total"], 2);

    let (_, page) = send(&app, "GET", "/items?name=Red&description=round", None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["name"], "Red Widget");

    let (_, page) = send(&app, "GET", "/items?name=&description=", None).await;
    assert_eq!(page["total"], 3);
}

#[tokio::test]
async fn test_update_missing_item() {
    let (_db, app) = app().await;

    let (status, body) = send(&app, "PUT", "/items/99", Some(json!({ "name": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item with id 99 not found" }));

    let (_, page) = send(&app, "GET", "/items", None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_update_requires_name() {
    let (_db, app) = app().await;
    send(&app, "POST", "/items", Some(json!({ "name": "Keep" }))).await;

    let (status, body) = send(&app, "PUT", "/items/1", Some(json!({ "description": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name is required" }));
}

#[tokio::test]
async fn test_update_name_conflicts() {
    let (_db, app) = app().await;
    send(&app, "POST", "/items", Some(json!({ "name": "First" }))).await;
    send(&app, "POST", "/items", Some(json!({ "name": "Second" }))).await;

    let (status, body) = send(&app, "PUT", "/items/2", Some(json!({ "name": "First" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Another item with this name already exists" })
    );

    // Renaming to its own name is allowed
    let (status, _) = send(
        &app,
        "PUT",
        "/items/2",
        Some(json!({ "name": "Second", "description": "same name" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let (_db, app) = app().await;
    send(&app, "POST", "/items", Some(json!({ "name": "Doomed" }))).await;

    let (status, _) = send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item with id 1 not found" }));
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let (_db, app) = app().await;
    send(&app, "POST", "/items", Some(json!({ "name": "One" }))).await;
    send(&app, "POST", "/items", Some(json!({ "name": "Two" }))).await;
    send(&app, "DELETE", "/items/2", None).await;

    let (_, created) = send(&app, "POST", "/items", Some(json!({ "name": "Three" }))).await;
    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let (_db, app) = app().await;

    let (status, body) = send(&app, "GET", "/items/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid id: not-a-number" }));
}
