//! Display tree structures for the hierarchical organizer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder node in the display tree.
///
/// Carries the folder's contained test cases and child folders in their
/// persisted sibling order, plus the client-side `expanded` flag that
/// controls whether the subtree is visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Whether the folder's contents are currently shown.
    #[serde(default)]
    pub expanded: bool,
    /// Test cases directly inside this folder, in display order.
    pub cases: Vec<CaseNode>,
    /// Child folder nodes, in display order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a collapsed, empty node.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            expanded: false,
            cases: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the expanded flag.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Replace the contained test cases.
    #[must_use]
    pub fn with_cases(mut self, cases: Vec<CaseNode>) -> Self {
        self.cases = cases;
        self
    }

    /// Replace the child folders.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Total number of folders in this subtree, including this node.
    pub fn folder_count(&self) -> u64 {
        1 + self.children.iter().map(TreeNode::folder_count).sum::<u64>()
    }

    /// Total number of test cases in this subtree.
    pub fn case_count(&self) -> u64 {
        self.cases.len() as u64
            + self.children.iter().map(TreeNode::case_count).sum::<u64>()
    }
}

/// A test-case leaf in the display tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseNode {
    /// Test case ID.
    pub id: Uuid,
    /// Test case name.
    pub name: String,
}

impl CaseNode {
    /// Create a case leaf.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
