//! Test-case version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::model::CaseContent;

/// An immutable snapshot of a test case at a point in its history.
///
/// Snapshots are append-only: version 1 is written when the test case is
/// created and every content update appends the next number. No operation
/// rewrites or removes a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The test case this version belongs to.
    pub case_id: Uuid,
    /// Sequential version number, starting at 1.
    pub version_number: i32,
    /// The test-case name at capture time.
    pub name: String,
    /// What the test verified at capture time.
    pub description: Option<String>,
    /// Preconditions at capture time.
    pub preconditions: Option<String>,
    /// Steps at capture time.
    pub steps: Option<String>,
    /// Expected outcome at capture time.
    pub expected_result: Option<String>,
    /// User who authored this version.
    pub created_by: Uuid,
    /// When this version was captured.
    pub created_at: DateTime<Utc>,
}

impl CaseVersion {
    /// The captured content fields, as an updatable content value.
    pub fn content(&self) -> CaseContent {
        CaseContent {
            description: self.description.clone(),
            preconditions: self.preconditions.clone(),
            steps: self.steps.clone(),
            expected_result: self.expected_result.clone(),
        }
    }
}
