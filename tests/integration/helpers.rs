//! Shared test helpers for integration tests.
//!
//! The pool is created lazily and never connected; the tests exercise
//! only paths that are rejected before any query is issued.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use testdeck_core::config::AppConfig;
use testdeck_database::repositories::{CaseRepository, FolderRepository};
use testdeck_service::{CaseService, CatalogService, FolderService, TreeService, VersionService};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": {},
            "database": { "url": "postgres://localhost/testdeck_test" },
            "logging": {}
        }))
        .expect("test config");

        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .expect("lazy pool");

        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let case_repo = Arc::new(CaseRepository::new(pool.clone()));

        let folder_service = Arc::new(FolderService::new(Arc::clone(&folder_repo)));
        let case_service = Arc::new(CaseService::new(
            Arc::clone(&case_repo),
            Arc::clone(&folder_repo),
        ));
        let version_service = Arc::new(VersionService::new(Arc::clone(&case_repo)));
        let tree_service = Arc::new(TreeService::new(folder_repo, case_repo));
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&folder_service),
            Arc::clone(&case_service),
            Arc::clone(&version_service),
            tree_service,
        ));

        let state = testdeck_api::AppState {
            config: Arc::new(config),
            db_pool: pool,
            folder_service,
            case_service,
            version_service,
            catalog,
        };

        Self {
            router: testdeck_api::build_router(state),
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
