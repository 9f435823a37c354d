//! Version history handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use testdeck_organizer::catalog::TreeCatalog;

use crate::dto::request::{RestoreRequest, UpdateContentRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// PUT /api/cases/{id}/content
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let version = state
        .catalog
        .record_update(id, req.content.into_content(), req.author)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": version })))
}

/// GET /api/cases/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let versions = state.catalog.list_versions(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": versions }),
    ))
}

/// GET /api/cases/{id}/versions/{version}
pub async fn get_version(
    State(state): State<AppState>,
    Path((id, version)): Path<(Uuid, i32)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state.version_service.get_version(id, version).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": snapshot }),
    ))
}

/// POST /api/cases/{id}/versions/{version}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    Path((id, version)): Path<(Uuid, i32)>,
    Json(req): Json<RestoreRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let restored = state
        .version_service
        .restore_version(id, version, req.author)
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": restored }),
    ))
}
