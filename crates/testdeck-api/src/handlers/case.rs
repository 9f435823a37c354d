//! Test case handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use testdeck_organizer::catalog::TreeCatalog;
use testdeck_organizer::projection::NodeRef;

use crate::dto::request::{
    CreateCaseRequest, DuplicateRequest, MoveCaseRequest, RenameRequest, ReorderRequest,
};
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/folders/{id}/cases
pub async fn list_cases(
    State(state): State<AppState>,
    Path(folder_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = state
        .case_service
        .list_cases(folder_id, params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/cases/{id}
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.case_service.get_case(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.catalog.create_test_case(req.into_create()).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// PUT /api/cases/{id}/rename
pub async fn rename_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.catalog.rename_test_case(id, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// PUT /api/cases/{id}/move
pub async fn move_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.catalog.move_test_case(id, req.folder_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// PUT /api/cases/{id}/reorder
pub async fn reorder_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .catalog
        .reorder_sibling(
            NodeRef::TestCase(id),
            NodeRef::TestCase(req.reference_id),
            req.placement.into(),
        )
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Test case reordered" } }),
    ))
}

/// POST /api/cases/{id}/duplicate
pub async fn duplicate_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DuplicateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let copy = state.catalog.duplicate_test_case(id, req.author).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": copy })))
}

/// DELETE /api/cases/{id}
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_test_case(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Test case deleted" } }),
    ))
}
