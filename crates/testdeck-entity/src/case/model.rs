//! Test-case entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A test case stored in TestDeck.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestCase {
    /// Unique test-case identifier.
    pub id: Uuid,
    /// The folder containing this test case.
    pub folder_id: Uuid,
    /// The test-case name.
    pub name: String,
    /// Position among sibling test cases (ascending display order).
    pub position: i32,
    /// What the test verifies.
    pub description: Option<String>,
    /// State required before the test can run.
    pub preconditions: Option<String>,
    /// The steps to execute.
    pub steps: Option<String>,
    /// The expected outcome.
    pub expected_result: Option<String>,
    /// Current version number.
    pub current_version: i32,
    /// When the test case was created.
    pub created_at: DateTime<Utc>,
    /// When the test case was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The updatable content fields of a test case.
///
/// Every content update replaces all four fields at once; the previous
/// values live on in the version history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseContent {
    /// What the test verifies.
    pub description: Option<String>,
    /// State required before the test can run.
    pub preconditions: Option<String>,
    /// The steps to execute.
    pub steps: Option<String>,
    /// The expected outcome.
    pub expected_result: Option<String>,
}

/// Data required to create a new test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestCase {
    /// The folder to place the test case in.
    pub folder_id: Uuid,
    /// The test-case name.
    pub name: String,
    /// Initial content.
    #[serde(default)]
    pub content: CaseContent,
    /// The user creating the test case.
    pub created_by: Uuid,
}
