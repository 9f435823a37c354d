//! Catalog adapter: exposes the services as a [`TreeCatalog`].

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use testdeck_core::error::AppError;
use testdeck_core::result::AppResult;
use testdeck_entity::case::{CaseContent, CaseVersion, CreateTestCase, TestCase};
use testdeck_entity::folder::{Folder, TreeNode};
use testdeck_organizer::catalog::TreeCatalog;
use testdeck_organizer::projection::NodeRef;
use testdeck_organizer::session::Placement;

use crate::case::{CaseService, VersionService};
use crate::folder::{FolderService, TreeService};

/// The production [`TreeCatalog`] implementation.
///
/// Delegates every catalog command to the corresponding service, so the
/// drag engine and the HTTP handlers go through the same validation and
/// logging paths.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Folder service.
    folders: Arc<FolderService>,
    /// Test case service.
    cases: Arc<CaseService>,
    /// Version history service.
    versions: Arc<VersionService>,
    /// Tree assembly service.
    tree: Arc<TreeService>,
}

impl CatalogService {
    /// Creates a new catalog over the services.
    pub fn new(
        folders: Arc<FolderService>,
        cases: Arc<CaseService>,
        versions: Arc<VersionService>,
        tree: Arc<TreeService>,
    ) -> Self {
        Self {
            folders,
            cases,
            versions,
            tree,
        }
    }
}

#[async_trait]
impl TreeCatalog for CatalogService {
    async fn list_folders(&self) -> AppResult<Vec<TreeNode>> {
        self.tree.list_forest().await
    }

    async fn create_folder(&self, parent_id: Option<Uuid>, name: &str) -> AppResult<Folder> {
        self.folders.create_folder(parent_id, name).await
    }

    async fn rename_folder(&self, folder_id: Uuid, name: &str) -> AppResult<Folder> {
        self.folders.rename_folder(folder_id, name).await
    }

    async fn delete_folder(&self, folder_id: Uuid) -> AppResult<()> {
        self.folders.delete_folder(folder_id).await
    }

    async fn duplicate_folder(&self, folder_id: Uuid, author: Uuid) -> AppResult<Folder> {
        self.folders.duplicate_folder(folder_id, author).await
    }

    async fn move_folder(
        &self,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        self.folders.move_folder(folder_id, new_parent_id).await
    }

    async fn create_test_case(&self, request: CreateTestCase) -> AppResult<TestCase> {
        self.cases.create_case(request).await
    }

    async fn rename_test_case(&self, case_id: Uuid, name: &str) -> AppResult<TestCase> {
        self.cases.rename_case(case_id, name).await
    }

    async fn delete_test_case(&self, case_id: Uuid) -> AppResult<()> {
        self.cases.delete_case(case_id).await
    }

    async fn duplicate_test_case(&self, case_id: Uuid, author: Uuid) -> AppResult<TestCase> {
        self.cases.duplicate_case(case_id, author).await
    }

    async fn move_test_case(&self, case_id: Uuid, folder_id: Uuid) -> AppResult<TestCase> {
        self.cases.move_case(case_id, folder_id).await
    }

    async fn reorder_sibling(
        &self,
        node: NodeRef,
        reference: NodeRef,
        placement: Placement,
    ) -> AppResult<()> {
        match (node, reference) {
            (NodeRef::Folder(folder_id), NodeRef::Folder(reference_id)) => {
                self.folders.reorder(folder_id, reference_id, placement).await
            }
            (NodeRef::TestCase(case_id), NodeRef::TestCase(reference_id)) => {
                self.cases.reorder(case_id, reference_id, placement).await
            }
            _ => Err(AppError::validation(
                "Reorder nodes must be of the same kind",
            )),
        }
    }

    async fn record_update(
        &self,
        case_id: Uuid,
        content: CaseContent,
        author: Uuid,
    ) -> AppResult<CaseVersion> {
        self.versions.record_update(case_id, content, author).await
    }

    async fn list_versions(&self, case_id: Uuid) -> AppResult<Vec<CaseVersion>> {
        self.versions.list_versions(case_id).await
    }
}
