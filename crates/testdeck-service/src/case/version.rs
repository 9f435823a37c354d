//! Version history service: append, list, and restore snapshots.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use testdeck_core::error::AppError;
use testdeck_core::result::AppResult;
use testdeck_database::repositories::case::CaseRepository;
use testdeck_entity::case::{CaseContent, CaseVersion};

/// Manages the append-only test case version history.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Test case repository.
    case_repo: Arc<CaseRepository>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(case_repo: Arc<CaseRepository>) -> Self {
        Self { case_repo }
    }

    /// Replaces a test case's content, appending the next snapshot and
    /// updating the live record in one transaction.
    pub async fn record_update(
        &self,
        case_id: Uuid,
        content: CaseContent,
        author: Uuid,
    ) -> AppResult<CaseVersion> {
        let version = self
            .case_repo
            .record_update(case_id, &content, author)
            .await?;

        info!(
            case_id = %case_id,
            version = version.version_number,
            author = %author,
            "Test case content updated"
        );

        Ok(version)
    }

    /// Lists a test case's snapshots, newest first.
    pub async fn list_versions(&self, case_id: Uuid) -> AppResult<Vec<CaseVersion>> {
        self.case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))?;

        self.case_repo.find_versions(case_id).await
    }

    /// Gets a single snapshot.
    pub async fn get_version(
        &self,
        case_id: Uuid,
        version_number: i32,
    ) -> AppResult<CaseVersion> {
        self.case_repo
            .find_version(case_id, version_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Version {version_number} of test case {case_id} not found"
                ))
            })
    }

    /// Copies an old snapshot's content forward as a new update.
    ///
    /// History stays append-only: restoring version N writes a fresh
    /// snapshot with N's content rather than rewinding the log.
    pub async fn restore_version(
        &self,
        case_id: Uuid,
        version_number: i32,
        author: Uuid,
    ) -> AppResult<CaseVersion> {
        let snapshot = self.get_version(case_id, version_number).await?;

        let version = self
            .case_repo
            .record_update(case_id, &snapshot.content(), author)
            .await?;

        info!(
            case_id = %case_id,
            restored_from = version_number,
            version = version.version_number,
            "Test case version restored"
        );

        Ok(version)
    }
}
