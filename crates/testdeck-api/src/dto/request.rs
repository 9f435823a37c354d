//! Request DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use testdeck_entity::case::{CaseContent, CreateTestCase};
use testdeck_organizer::session::Placement;

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Parent folder, `null` for a root folder.
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
}

/// Rename request body, shared by folders and test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    /// New name.
    pub name: String,
}

/// Move folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder, `null` for root level.
    pub new_parent_id: Option<Uuid>,
}

/// Move test case request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCaseRequest {
    /// Destination folder.
    pub folder_id: Uuid,
}

/// Reorder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Sibling the moved node is placed next to.
    pub reference_id: Uuid,
    /// Which side of the reference sibling to land on.
    pub placement: PlacementParam,
}

/// Placement of a reordered node relative to its reference sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementParam {
    /// Insert before the reference sibling.
    Before,
    /// Insert after the reference sibling.
    After,
}

impl From<PlacementParam> for Placement {
    fn from(param: PlacementParam) -> Self {
        match param {
            PlacementParam::Before => Placement::Before,
            PlacementParam::After => Placement::After,
        }
    }
}

/// Duplicate request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRequest {
    /// User recorded as the author of the copied snapshots.
    pub author: Uuid,
}

/// Create test case request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseRequest {
    /// Folder the case belongs to.
    pub folder_id: Uuid,
    /// Case name.
    pub name: String,
    /// Initial content, all fields optional.
    #[serde(default)]
    pub content: CaseContentBody,
    /// User recorded as the author of version 1.
    pub author: Uuid,
}

impl CreateCaseRequest {
    /// Converts into the entity-level creation payload.
    pub fn into_create(self) -> CreateTestCase {
        CreateTestCase {
            folder_id: self.folder_id,
            name: self.name,
            content: self.content.into_content(),
            created_by: self.author,
        }
    }
}

/// Update test case content request body.
///
/// Every update appends a new immutable version; the fields carry the
/// full replacement content, not a diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContentRequest {
    /// Replacement content.
    #[serde(flatten)]
    pub content: CaseContentBody,
    /// User recorded as the author of the new version.
    pub author: Uuid,
}

/// Restore version request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreRequest {
    /// User recorded as the author of the restoring version.
    pub author: Uuid,
}

/// Editable content fields of a test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseContentBody {
    /// What the case verifies.
    pub description: Option<String>,
    /// Required setup before execution.
    pub preconditions: Option<String>,
    /// Steps to execute.
    pub steps: Option<String>,
    /// Expected outcome.
    pub expected_result: Option<String>,
}

impl CaseContentBody {
    /// Converts into the entity-level content payload.
    pub fn into_content(self) -> CaseContent {
        CaseContent {
            description: self.description,
            preconditions: self.preconditions,
            steps: self.steps,
            expected_result: self.expected_result,
        }
    }
}
