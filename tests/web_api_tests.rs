//! Integration tests for the Prefab Planner Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use prefab_planner::web::create_router;

mod fixtures;
use fixtures::test_store;

fn test_app() -> axum::Router {
    create_router(test_store(10, 10))
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to POST a JSON body and get the response body as JSON.
async fn post_json(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// ============================================================================
// Catalog and State Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_endpoint() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/catalog").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2x2", "3x2", "1x1"]);
}

#[tokio::test]
async fn test_initial_state() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 0);
    assert_eq!(body["mode"], "idle");
    assert_eq!(body["state"]["grid"]["cellsX"], 10);
    assert_eq!(body["metrics"]["moduleCount"], 0);
    assert!(body.get("ghost").is_none());
}

// ============================================================================
// Command Tests
// ============================================================================

#[tokio::test]
async fn test_single_command() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/api/commands",
        r#"{ "type": "addModule", "presetId": "2x2", "gridX": 0, "gridZ": 0 }"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcomes"][0]["status"], "created");
    assert_eq!(body["version"], 1);
    assert_eq!(body["metrics"]["totalPrice"], 1000);
}

#[tokio::test]
async fn test_command_batch_shares_state() {
    let app = test_app();
    let batch = json!([
        { "type": "addModule", "presetId": "2x2", "gridX": 0, "gridZ": 0 },
        { "type": "addModule", "presetId": "3x2", "gridX": 1, "gridZ": 1 },
        { "type": "setSelectedPreset", "presetId": "1x1" },
        { "type": "updatePreview", "cell": { "x": 5, "z": 5 } }
    ]);
    let (_, body) = post_json(&app, "/api/commands", &batch.to_string()).await;
    assert_eq!(body["outcomes"][1]["status"], "rejected");

    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["mode"], "presetArmed");
    assert_eq!(state["ghost"]["isValid"], true);
    assert_eq!(state["state"]["placedModules"].as_array().unwrap().len(), 1);

    let (_, body) = post_json(&app, "/api/commands", r#"{ "type": "commitPreview" }"#).await;
    assert_eq!(body["outcomes"][0]["status"], "created");
    assert_eq!(body["metrics"]["moduleCount"], 2);
}

#[tokio::test]
async fn test_invalid_command_is_bad_request() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/commands", r#"{ "type": "teleport" }"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid command");
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_endpoints() {
    let app = test_app();
    post_json(
        &app,
        "/api/commands",
        r#"{ "type": "loadPreset", "starterId": "pair" }"#,
    )
    .await;

    let (status, document) = get_json(&app, "/api/export").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["modules"].as_array().unwrap().len(), 2);
    assert_eq!(document["summary"]["totalPrice"], 2500);

    let (_, summary) = get_json(&app, "/api/export/summary").await;
    assert!(summary["text"].as_str().unwrap().contains("€ 2.500"));

    let (_, markdown) = get_json(&app, "/api/export/markdown").await;
    assert!(markdown["suggestedFilename"]
        .as_str()
        .unwrap()
        .ends_with(".md"));

    let (_, snapshot) = get_json(&app, "/api/export/snapshot").await;
    assert_eq!(snapshot["cellsX"], 10);
    assert_eq!(snapshot["widthMeters"], 30.0);
}
