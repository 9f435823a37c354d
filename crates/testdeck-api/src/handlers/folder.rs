//! Folder and tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use testdeck_organizer::catalog::TreeCatalog;
use testdeck_organizer::projection::NodeRef;

use crate::dto::request::{
    CreateFolderRequest, DuplicateRequest, MoveFolderRequest, RenameRequest, ReorderRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/tree
pub async fn get_tree(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let forest = state.catalog.list_folders().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": forest })))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.get_folder(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state
        .catalog
        .create_folder(req.parent_id, &req.name)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// PUT /api/folders/{id}/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.catalog.rename_folder(id, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.catalog.move_folder(id, req.new_parent_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// PUT /api/folders/{id}/reorder
pub async fn reorder_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .catalog
        .reorder_sibling(
            NodeRef::Folder(id),
            NodeRef::Folder(req.reference_id),
            req.placement.into(),
        )
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Folder reordered" } }),
    ))
}

/// POST /api/folders/{id}/duplicate
pub async fn duplicate_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DuplicateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let copy = state.catalog.duplicate_folder(id, req.author).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": copy })))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_folder(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Folder deleted" } }),
    ))
}
