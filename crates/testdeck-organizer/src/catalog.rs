//! The repository collaborator the organizer issues commands against.

use async_trait::async_trait;
use testdeck_core::AppResult;
use testdeck_entity::case::{CaseContent, CaseVersion, CreateTestCase, TestCase};
use testdeck_entity::folder::{Folder, TreeNode};
use uuid::Uuid;

use crate::projection::NodeRef;
use crate::session::Placement;

/// Asynchronous access to the folder/test-case catalog.
///
/// The organizer never mutates tree state itself; every structural change
/// goes through exactly one call on this trait. The production
/// implementation talks to the persistence layer; tests substitute an
/// in-memory fake.
///
/// Implementations must persist sibling order, cascade folder deletion
/// through the subtree, and keep version history append-only with
/// contiguous numbering per test case (concurrent
/// [`record_update`](TreeCatalog::record_update) calls on one case must
/// each get a distinct, successive number).
#[async_trait]
pub trait TreeCatalog: Send + Sync {
    /// The full display forest, in persisted sibling order.
    async fn list_folders(&self) -> AppResult<Vec<TreeNode>>;

    /// Create a folder under `parent_id` (`None` for a root folder).
    async fn create_folder(&self, parent_id: Option<Uuid>, name: &str) -> AppResult<Folder>;

    /// Rename a folder. Does not touch its contents.
    async fn rename_folder(&self, folder_id: Uuid, name: &str) -> AppResult<Folder>;

    /// Delete a folder and everything beneath it.
    async fn delete_folder(&self, folder_id: Uuid) -> AppResult<()>;

    /// Deep-copy a folder's subtree next to the original. Copied test
    /// cases restart their history at version 1, authored by `author`.
    async fn duplicate_folder(&self, folder_id: Uuid, author: Uuid) -> AppResult<Folder>;

    /// Reparent a folder (`None` moves it to the root level).
    async fn move_folder(&self, folder_id: Uuid, new_parent_id: Option<Uuid>) -> AppResult<Folder>;

    /// Create a test case with its initial content; snapshot 1 is written
    /// alongside the live record.
    async fn create_test_case(&self, request: CreateTestCase) -> AppResult<TestCase>;

    /// Rename a test case. No snapshot is written.
    async fn rename_test_case(&self, case_id: Uuid, name: &str) -> AppResult<TestCase>;

    /// Delete a test case.
    async fn delete_test_case(&self, case_id: Uuid) -> AppResult<()>;

    /// Copy a test case next to the original, history restarting at
    /// version 1 authored by `author`.
    async fn duplicate_test_case(&self, case_id: Uuid, author: Uuid) -> AppResult<TestCase>;

    /// Move a test case into another folder.
    async fn move_test_case(&self, case_id: Uuid, folder_id: Uuid) -> AppResult<TestCase>;

    /// Place `node` before or after `reference` among its siblings. Both
    /// must be the same kind and share a parent.
    async fn reorder_sibling(
        &self,
        node: NodeRef,
        reference: NodeRef,
        placement: Placement,
    ) -> AppResult<()>;

    /// Replace a test case's content, appending the next version
    /// snapshot. Returns the snapshot that was written.
    async fn record_update(
        &self,
        case_id: Uuid,
        content: CaseContent,
        author: Uuid,
    ) -> AppResult<CaseVersion>;

    /// A test case's history, newest first.
    async fn list_versions(&self, case_id: Uuid) -> AppResult<Vec<CaseVersion>>;
}
