//! Test case CRUD, move, duplicate, and reorder operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use testdeck_core::error::AppError;
use testdeck_core::result::AppResult;
use testdeck_core::types::pagination::{PageRequest, PageResponse};
use testdeck_database::repositories::case::CaseRepository;
use testdeck_database::repositories::folder::FolderRepository;
use testdeck_entity::case::{CreateTestCase, TestCase};
use testdeck_organizer::naming::validate_name_text;
use testdeck_organizer::session::Placement;

use crate::naming::duplicate_name;

/// Manages test case operations.
#[derive(Debug, Clone)]
pub struct CaseService {
    /// Test case repository.
    case_repo: Arc<CaseRepository>,
    /// Folder repository, for target checks.
    folder_repo: Arc<FolderRepository>,
}

impl CaseService {
    /// Creates a new test case service.
    pub fn new(case_repo: Arc<CaseRepository>, folder_repo: Arc<FolderRepository>) -> Self {
        Self {
            case_repo,
            folder_repo,
        }
    }

    /// Gets a test case by ID.
    pub async fn get_case(&self, case_id: Uuid) -> AppResult<TestCase> {
        self.case_repo
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))
    }

    /// Lists the test cases in a folder with pagination.
    pub async fn list_cases(
        &self,
        folder_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<TestCase>> {
        self.require_folder(folder_id).await?;
        self.case_repo.find_by_folder(folder_id, &page).await
    }

    /// Creates a test case with its initial content; snapshot 1 is
    /// written alongside the live record.
    pub async fn create_case(&self, request: CreateTestCase) -> AppResult<TestCase> {
        validate_name_text(&request.name)?;
        self.require_folder(request.folder_id).await?;

        let case = self.case_repo.create(&request).await?;

        info!(
            case_id = %case.id,
            folder_id = %case.folder_id,
            name = %case.name,
            "Test case created"
        );

        Ok(case)
    }

    /// Renames a test case. No snapshot is written.
    pub async fn rename_case(&self, case_id: Uuid, new_name: &str) -> AppResult<TestCase> {
        validate_name_text(new_name)?;

        let case = self.case_repo.rename(case_id, new_name).await?;

        info!(case_id = %case_id, new_name = %new_name, "Test case renamed");
        Ok(case)
    }

    /// Moves a test case into another folder, appending it at the end.
    pub async fn move_case(&self, case_id: Uuid, folder_id: Uuid) -> AppResult<TestCase> {
        self.require_folder(folder_id).await?;

        let case = self.case_repo.move_case(case_id, folder_id).await?;

        info!(case_id = %case_id, folder_id = %folder_id, "Test case moved");
        Ok(case)
    }

    /// Deletes a test case and its version history.
    pub async fn delete_case(&self, case_id: Uuid) -> AppResult<()> {
        if !self.case_repo.delete(case_id).await? {
            return Err(AppError::not_found(format!("Test case {case_id} not found")));
        }

        info!(case_id = %case_id, "Test case deleted");
        Ok(())
    }

    /// Copies a test case next to the original.
    ///
    /// The copy takes the first free `" (Copy)"`-suffixed name in its
    /// folder and restarts its history at version 1, authored by
    /// `author`.
    pub async fn duplicate_case(&self, case_id: Uuid, author: Uuid) -> AppResult<TestCase> {
        let source = self.get_case(case_id).await?;

        let taken = self.case_repo.find_names_in_folder(source.folder_id).await?;
        let new_name = duplicate_name(&source.name, &taken);

        let copy = self.case_repo.duplicate(case_id, &new_name, author).await?;

        info!(
            source_id = %case_id,
            copy_id = %copy.id,
            copy_name = %copy.name,
            "Test case duplicated"
        );

        Ok(copy)
    }

    /// Places a test case before or after a sibling.
    pub async fn reorder(
        &self,
        case_id: Uuid,
        reference_id: Uuid,
        placement: Placement,
    ) -> AppResult<()> {
        let after = matches!(placement, Placement::After);
        self.case_repo.reorder(case_id, reference_id, after).await?;

        info!(
            case_id = %case_id,
            reference_id = %reference_id,
            after,
            "Test case reordered"
        );
        Ok(())
    }

    async fn require_folder(&self, folder_id: Uuid) -> AppResult<()> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        Ok(())
    }
}
