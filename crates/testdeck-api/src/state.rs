//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use testdeck_core::config::AppConfig;
use testdeck_service::{CaseService, CatalogService, FolderService, VersionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Services ─────────────────────────────────────────────
    /// Folder service (reads outside the catalog surface)
    pub folder_service: Arc<FolderService>,
    /// Test case service (reads outside the catalog surface)
    pub case_service: Arc<CaseService>,
    /// Version history service (snapshot reads and restore)
    pub version_service: Arc<VersionService>,
    /// Catalog command surface, shared with the drag engine
    pub catalog: Arc<CatalogService>,
}
