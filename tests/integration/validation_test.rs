//! Integration tests for request validation on the catalog routes.
//!
//! Every request here is rejected by the service layer before a query
//! is issued, so no database is required.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_short_folder_name_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "parent_id": null, "name": "A" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_symbol_folder_name_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "parent_id": null, "name": "Bad!Name" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_overlong_case_name_rejected() {
    let app = helpers::TestApp::new();
    let name = "X".repeat(51);

    let response = app
        .request(
            "POST",
            "/api/cases",
            Some(serde_json::json!({
                "folder_id": "00000000-0000-0000-0000-000000000001",
                "name": name,
                "author": "00000000-0000-0000-0000-000000000002",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_folder_self_reorder_rejected() {
    let app = helpers::TestApp::new();
    let id = "00000000-0000-0000-0000-000000000001";

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{id}/reorder"),
            Some(serde_json::json!({ "reference_id": id, "placement": "before" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_case_self_reorder_rejected() {
    let app = helpers::TestApp::new();
    let id = "00000000-0000-0000-0000-000000000003";

    let response = app
        .request(
            "PUT",
            &format!("/api/cases/{id}/reorder"),
            Some(serde_json::json!({ "reference_id": id, "placement": "after" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rename_to_short_name_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "PUT",
            "/api/folders/00000000-0000-0000-0000-000000000001/rename",
            Some(serde_json::json!({ "name": "A" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
