//! Flattening the display forest into visible rows.

use testdeck_entity::folder::TreeNode;
use uuid::Uuid;

/// The two kinds of row the organizer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A folder row.
    Folder,
    /// A test-case row.
    TestCase,
}

impl RowKind {
    /// Human-readable label for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::TestCase => "test case",
        }
    }
}

/// A typed reference to a node in the display forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A folder, by id.
    Folder(Uuid),
    /// A test case, by id.
    TestCase(Uuid),
}

impl NodeRef {
    /// The referenced id, regardless of kind.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Folder(id) | Self::TestCase(id) => *id,
        }
    }

    /// The row kind this reference points at.
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Folder(_) => RowKind::Folder,
            Self::TestCase(_) => RowKind::TestCase,
        }
    }

    /// Whether this references a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// One visible row of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    /// The node this row displays.
    pub node: NodeRef,
    /// The display name.
    pub name: String,
    /// Indentation depth (root folders are 0).
    pub depth: u16,
}

/// Flatten the forest into the ordered list of visible rows.
///
/// Root folders are emitted in order at depth 0. An expanded folder is
/// followed by its test cases at depth+1, then by the recursive
/// projection of its child folders at depth+1. A collapsed folder
/// contributes exactly one row; its contents stay invisible.
///
/// The projection is rebuilt from scratch on every call. Callers rebuild
/// it whenever the forest or an `expanded` flag changes.
pub fn project(roots: &[TreeNode]) -> Vec<ProjectedRow> {
    let mut rows = Vec::new();
    for root in roots {
        project_node(root, 0, &mut rows);
    }
    rows
}

fn project_node(node: &TreeNode, depth: u16, rows: &mut Vec<ProjectedRow>) {
    rows.push(ProjectedRow {
        node: NodeRef::Folder(node.id),
        name: node.name.clone(),
        depth,
    });
    if !node.expanded {
        return;
    }
    for case in &node.cases {
        rows.push(ProjectedRow {
            node: NodeRef::TestCase(case.id),
            name: case.name.clone(),
            depth: depth + 1,
        });
    }
    for child in &node.children {
        project_node(child, depth + 1, rows);
    }
}
