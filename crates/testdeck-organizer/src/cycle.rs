//! Ancestry-cycle guarding for folder moves.

use std::collections::HashSet;

use testdeck_entity::folder::TreeNode;
use uuid::Uuid;

use crate::projection::NodeRef;

/// Check whether dropping `dragged` onto `target` is legal.
///
/// A move is illegal when the target is the dragged node itself, or when
/// the dragged node is a folder and the target lies anywhere inside that
/// folder's subtree. Test-case drags cannot create cycles and are always
/// legal here (other rules are the classifier's business).
///
/// Results are never cached: every call walks the forest snapshot it is
/// given, so the caller can re-check against the latest tree right before
/// committing.
pub fn is_legal_move(roots: &[TreeNode], dragged: NodeRef, target: NodeRef) -> bool {
    if dragged == target {
        return false;
    }
    let NodeRef::Folder(folder_id) = dragged else {
        return true;
    };
    let Some(subtree) = find_folder(roots, folder_id) else {
        // The dragged folder is gone from this snapshot; the repository
        // will reject the move if it is gone for real.
        return true;
    };
    !subtree_contains(subtree, target.id())
}

/// Locate a folder node anywhere in the forest.
fn find_folder<'a>(roots: &'a [TreeNode], id: Uuid) -> Option<&'a TreeNode> {
    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut stack: Vec<&TreeNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if !visited.insert(node.id) {
            continue;
        }
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter());
    }
    None
}

/// Walk the subtree under `root` looking for `needle` among folders and
/// contained cases. The visited set keeps a malformed snapshot from
/// looping the walk.
fn subtree_contains(root: &TreeNode, needle: Uuid) -> bool {
    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut stack: Vec<&TreeNode> = vec![root];
    while let Some(node) = stack.pop() {
        if !visited.insert(node.id) {
            continue;
        }
        if node.id == needle {
            return true;
        }
        if node.cases.iter().any(|case| case.id == needle) {
            return true;
        }
        stack.extend(node.children.iter());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdeck_entity::folder::CaseNode;

    struct Fixture {
        roots: Vec<TreeNode>,
        f1: Uuid,
        f2: Uuid,
        sibling: Uuid,
        case_in_f2: Uuid,
    }

    /// F1 > F2 (contains one case), plus an unrelated sibling root.
    fn fixture() -> Fixture {
        let f1 = Uuid::new_v4();
        let f2 = Uuid::new_v4();
        let sibling = Uuid::new_v4();
        let case_in_f2 = Uuid::new_v4();
        let roots = vec![
            TreeNode::new(f1, "F1").with_expanded(true).with_children(vec![
                TreeNode::new(f2, "F2")
                    .with_expanded(true)
                    .with_cases(vec![CaseNode::new(case_in_f2, "Case in F2")]),
            ]),
            TreeNode::new(sibling, "Elsewhere"),
        ];
        Fixture {
            roots,
            f1,
            f2,
            sibling,
            case_in_f2,
        }
    }

    #[test]
    fn folder_cannot_drop_onto_itself() {
        let fx = fixture();
        assert!(!is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f1),
            NodeRef::Folder(fx.f1)
        ));
    }

    #[test]
    fn folder_cannot_drop_into_its_descendant() {
        let fx = fixture();
        assert!(!is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f1),
            NodeRef::Folder(fx.f2)
        ));
    }

    #[test]
    fn folder_cannot_drop_onto_a_case_inside_itself() {
        let fx = fixture();
        assert!(!is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f1),
            NodeRef::TestCase(fx.case_in_f2)
        ));
    }

    #[test]
    fn folder_may_move_to_an_unrelated_folder() {
        let fx = fixture();
        assert!(is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f2),
            NodeRef::Folder(fx.sibling)
        ));
    }

    #[test]
    fn child_may_move_up_to_its_ancestor() {
        let fx = fixture();
        assert!(is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f2),
            NodeRef::Folder(fx.f1)
        ));
    }

    #[test]
    fn case_drags_are_always_cycle_free() {
        let fx = fixture();
        assert!(is_legal_move(
            &fx.roots,
            NodeRef::TestCase(fx.case_in_f2),
            NodeRef::Folder(fx.f1)
        ));
        assert!(is_legal_move(
            &fx.roots,
            NodeRef::TestCase(fx.case_in_f2),
            NodeRef::Folder(fx.sibling)
        ));
    }

    #[test]
    fn check_reflects_the_snapshot_it_is_given() {
        let fx = fixture();
        // Against a rearranged snapshot where F2 is a root, the same
        // move becomes legal: nothing is remembered between calls.
        let rearranged = vec![
            TreeNode::new(fx.f1, "F1"),
            TreeNode::new(fx.f2, "F2"),
        ];
        assert!(!is_legal_move(
            &fx.roots,
            NodeRef::Folder(fx.f1),
            NodeRef::Folder(fx.f2)
        ));
        assert!(is_legal_move(
            &rearranged,
            NodeRef::Folder(fx.f1),
            NodeRef::Folder(fx.f2)
        ));
    }
}
