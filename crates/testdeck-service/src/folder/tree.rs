//! Display forest assembly from flat folder and test case rows.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use testdeck_core::result::AppResult;
use testdeck_database::repositories::case::CaseRepository;
use testdeck_database::repositories::folder::FolderRepository;
use testdeck_entity::case::TestCase;
use testdeck_entity::folder::{CaseNode, Folder, TreeNode};

/// Builds the nested display forest.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Test case repository.
    case_repo: Arc<CaseRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folder_repo: Arc<FolderRepository>, case_repo: Arc<CaseRepository>) -> Self {
        Self {
            folder_repo,
            case_repo,
        }
    }

    /// Builds the complete forest in persisted sibling order.
    ///
    /// Every folder comes back expanded; collapse state lives on the
    /// client and is not domain truth.
    pub async fn list_forest(&self) -> AppResult<Vec<TreeNode>> {
        let folders = self.folder_repo.find_all().await?;
        let cases = self.case_repo.find_all().await?;
        Ok(build_forest(folders, cases))
    }
}

/// Assemble the nested forest from flat rows.
///
/// Expects both row sets in sibling order, as the repositories return
/// them; groups keep that relative order.
fn build_forest(folders: Vec<Folder>, cases: Vec<TestCase>) -> Vec<TreeNode> {
    let mut cases_by_folder: HashMap<Uuid, Vec<CaseNode>> = HashMap::new();
    for case in cases {
        cases_by_folder
            .entry(case.folder_id)
            .or_default()
            .push(CaseNode::new(case.id, case.name));
    }

    let mut folders_by_parent: HashMap<Option<Uuid>, Vec<Folder>> = HashMap::new();
    for folder in folders {
        folders_by_parent
            .entry(folder.parent_id)
            .or_default()
            .push(folder);
    }

    build_level(None, &folders_by_parent, &mut cases_by_folder)
}

fn build_level(
    parent_id: Option<Uuid>,
    folders_by_parent: &HashMap<Option<Uuid>, Vec<Folder>>,
    cases_by_folder: &mut HashMap<Uuid, Vec<CaseNode>>,
) -> Vec<TreeNode> {
    let Some(folders) = folders_by_parent.get(&parent_id) else {
        return Vec::new();
    };

    folders
        .iter()
        .map(|folder| {
            let cases = cases_by_folder.remove(&folder.id).unwrap_or_default();
            let children = build_level(Some(folder.id), folders_by_parent, cases_by_folder);
            TreeNode::new(folder.id, folder.name.clone())
                .with_expanded(true)
                .with_cases(cases)
                .with_children(children)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn folder(id: Uuid, parent_id: Option<Uuid>, name: &str, position: i32) -> Folder {
        Folder {
            id,
            parent_id,
            name: name.to_string(),
            position,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn case(id: Uuid, folder_id: Uuid, name: &str, position: i32) -> TestCase {
        TestCase {
            id,
            folder_id,
            name: name.to_string(),
            position,
            description: None,
            preconditions: None,
            steps: None,
            expected_result: None,
            current_version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_rows_build_an_empty_forest() {
        assert!(build_forest(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn children_and_cases_land_under_their_parents() {
        let root_id = Uuid::new_v4();
        let child_id = Uuid::new_v4();
        let folders = vec![
            folder(root_id, None, "Suite", 0),
            folder(child_id, Some(root_id), "Smoke", 0),
        ];
        let cases = vec![
            case(Uuid::new_v4(), root_id, "Boots", 0),
            case(Uuid::new_v4(), child_id, "Login works", 0),
        ];

        let forest = build_forest(folders, cases);
        assert_eq!(forest.len(), 1);
        let root = &forest[0];
        assert!(root.expanded);
        assert_eq!(root.cases.len(), 1);
        assert_eq!(root.cases[0].name, "Boots");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "Smoke");
        assert_eq!(root.children[0].cases[0].name, "Login works");
        assert_eq!(root.folder_count(), 2);
        assert_eq!(root.case_count(), 2);
    }

    #[test]
    fn sibling_order_follows_the_row_order() {
        let root_id = Uuid::new_v4();
        // Rows arrive sorted by position, the way find_all returns them.
        let folders = vec![
            folder(root_id, None, "Suite", 0),
            folder(Uuid::new_v4(), Some(root_id), "First", 0),
            folder(Uuid::new_v4(), Some(root_id), "Second", 1),
            folder(Uuid::new_v4(), Some(root_id), "Third", 2),
        ];
        let cases = vec![
            case(Uuid::new_v4(), root_id, "Alpha", 0),
            case(Uuid::new_v4(), root_id, "Beta", 1),
        ];

        let forest = build_forest(folders, cases);
        let child_names: Vec<&str> =
            forest[0].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(child_names, vec!["First", "Second", "Third"]);
        let case_names: Vec<&str> = forest[0].cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(case_names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn deep_chains_nest_one_level_per_folder() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let folders = vec![
            folder(ids[0], None, "L0", 0),
            folder(ids[1], Some(ids[0]), "L1", 0),
            folder(ids[2], Some(ids[1]), "L2", 0),
            folder(ids[3], Some(ids[2]), "L3", 0),
        ];

        let forest = build_forest(folders, Vec::new());
        assert_eq!(forest[0].folder_count(), 4);
        let mut node = &forest[0];
        let mut depth = 0;
        while let Some(child) = node.children.first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 3);
        assert_eq!(node.name, "L3");
    }
}
