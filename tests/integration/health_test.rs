//! Integration tests for health and routing.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_ok() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/nothing-here", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_folder_id_rejected() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/folders/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
