//! Drag session data and drop classification.

use std::collections::HashSet;

use testdeck_entity::folder::TreeNode;
use uuid::Uuid;

use crate::cycle::is_legal_move;
use crate::geometry::{BandZone, Point, RowLayout};
use crate::projection::NodeRef;

/// Where a reordered node lands relative to its reference sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the reference sibling.
    Before,
    /// Immediately after the reference sibling.
    After,
}

/// What releasing the pointer right now would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropClassification {
    /// No legal drop at the current pointer position.
    None,
    /// Reparent the dragged node into this folder.
    Hierarchy {
        /// The folder that would become the parent.
        parent: Uuid,
    },
    /// Move the dragged node next to a sibling.
    Reorder {
        /// The sibling to place relative to.
        reference: NodeRef,
        /// Before or after that sibling.
        placement: Placement,
    },
}

impl DropClassification {
    /// Whether releasing now would do nothing.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// State of one pointer gesture, from press to release.
///
/// Created on pointer-down and discarded when the gesture ends, whatever
/// the outcome.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The node under the pointer at press time.
    pub dragged: NodeRef,
    /// Where the press happened.
    pub origin: Point,
    /// The latest pointer position.
    pub pointer: Point,
    /// The classification of the latest pointer position.
    pub classification: DropClassification,
}

impl DragSession {
    pub(crate) fn new(dragged: NodeRef, origin: Point) -> Self {
        Self {
            dragged,
            origin,
            pointer: origin,
            classification: DropClassification::None,
        }
    }

    /// Straight-line distance the pointer has travelled since the press.
    pub fn travel(&self) -> f32 {
        self.origin.distance(self.pointer)
    }

    /// Recompute and store the drop classification for the current
    /// pointer position.
    pub(crate) fn reclassify(
        &mut self,
        layout: &RowLayout,
        roots: &[TreeNode],
        hierarchy_band: f32,
    ) -> DropClassification {
        self.classification = classify(self.dragged, self.pointer, layout, roots, hierarchy_band);
        self.classification
    }
}

/// Classify what dropping `dragged` at `pointer` would do.
///
/// The candidate row is the nearest band; its central zone means a
/// hierarchy drop (folders only, cycle-guarded), the outer zones mean a
/// reorder before or after the candidate. Reorders only make sense
/// between siblings of the same kind; anything else classifies as
/// [`DropClassification::None`].
pub fn classify(
    dragged: NodeRef,
    pointer: Point,
    layout: &RowLayout,
    roots: &[TreeNode],
    hierarchy_band: f32,
) -> DropClassification {
    let Some(row) = layout.nearest_row(pointer) else {
        return DropClassification::None;
    };
    if row.node == dragged {
        return DropClassification::None;
    }
    match row.zone(pointer.y, hierarchy_band) {
        BandZone::Middle => match row.node {
            NodeRef::Folder(parent) if is_legal_move(roots, dragged, row.node) => {
                DropClassification::Hierarchy { parent }
            }
            _ => DropClassification::None,
        },
        zone @ (BandZone::Upper | BandZone::Lower) => {
            if row.node.kind() != dragged.kind() {
                return DropClassification::None;
            }
            let (Some(dragged_scope), Some(candidate_scope)) =
                (parent_of(roots, dragged), parent_of(roots, row.node))
            else {
                return DropClassification::None;
            };
            if dragged_scope != candidate_scope {
                return DropClassification::None;
            }
            let placement = match zone {
                BandZone::Upper => Placement::Before,
                _ => Placement::After,
            };
            DropClassification::Reorder {
                reference: row.node,
                placement,
            }
        }
    }
}

/// Find the scope a node currently sits in: `Some(None)` for a root
/// folder, `Some(Some(id))` for a node inside folder `id`, `None` when
/// the node is not in the forest at all.
fn parent_of(roots: &[TreeNode], node: NodeRef) -> Option<Option<Uuid>> {
    if let NodeRef::Folder(id) = node {
        if roots.iter().any(|root| root.id == id) {
            return Some(None);
        }
    }
    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut stack: Vec<&TreeNode> = roots.iter().collect();
    while let Some(folder) = stack.pop() {
        if !visited.insert(folder.id) {
            continue;
        }
        let here = match node {
            NodeRef::Folder(id) => folder.children.iter().any(|child| child.id == id),
            NodeRef::TestCase(id) => folder.cases.iter().any(|case| case.id == id),
        };
        if here {
            return Some(Some(folder.id));
        }
        stack.extend(folder.children.iter());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use testdeck_entity::folder::CaseNode;

    const ROW: f32 = 20.0;

    struct Fixture {
        roots: Vec<TreeNode>,
        layout: RowLayout,
        parent: Uuid,
        smoke: Uuid,
        regression: Uuid,
        case_a: Uuid,
        case_b: Uuid,
    }

    /// Parent (expanded) with two cases then two child folders; four
    /// visible rows below the parent at uniform height.
    fn fixture() -> Fixture {
        let parent = Uuid::new_v4();
        let smoke = Uuid::new_v4();
        let regression = Uuid::new_v4();
        let case_a = Uuid::new_v4();
        let case_b = Uuid::new_v4();
        let roots = vec![
            TreeNode::new(parent, "Suite")
                .with_expanded(true)
                .with_cases(vec![
                    CaseNode::new(case_a, "Login works"),
                    CaseNode::new(case_b, "Logout works"),
                ])
                .with_children(vec![
                    TreeNode::new(smoke, "Smoke"),
                    TreeNode::new(regression, "Regression"),
                ]),
        ];
        let layout = RowLayout::uniform(&project(&roots), ROW);
        Fixture {
            roots,
            layout,
            parent,
            smoke,
            regression,
            case_a,
            case_b,
        }
    }

    /// Pointer at the vertical center of row `index`.
    fn center_of(index: usize) -> Point {
        Point::new(10.0, index as f32 * ROW + ROW / 2.0)
    }

    /// Pointer in the upper reorder band of row `index`.
    fn upper_of(index: usize) -> Point {
        Point::new(10.0, index as f32 * ROW + 2.0)
    }

    /// Pointer in the lower reorder band of row `index`.
    fn lower_of(index: usize) -> Point {
        Point::new(10.0, index as f32 * ROW + ROW - 2.0)
    }

    // Row order: 0 Suite, 1 case_a, 2 case_b, 3 Smoke, 4 Regression.

    #[test]
    fn center_of_a_folder_classifies_hierarchy() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.smoke),
            center_of(0),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::Hierarchy { parent: fx.parent });
    }

    #[test]
    fn center_of_a_case_row_is_not_a_drop() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.smoke),
            center_of(1),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }

    #[test]
    fn upper_band_of_a_sibling_reorders_before() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.regression),
            upper_of(3),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(
            got,
            DropClassification::Reorder {
                reference: NodeRef::Folder(fx.smoke),
                placement: Placement::Before,
            }
        );
    }

    #[test]
    fn lower_band_of_a_sibling_reorders_after() {
        let fx = fixture();
        let got = classify(
            NodeRef::TestCase(fx.case_a),
            lower_of(2),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(
            got,
            DropClassification::Reorder {
                reference: NodeRef::TestCase(fx.case_b),
                placement: Placement::After,
            }
        );
    }

    #[test]
    fn reorder_needs_matching_kind() {
        let fx = fixture();
        // A folder over a case row's reorder band: kinds differ.
        let got = classify(
            NodeRef::Folder(fx.smoke),
            upper_of(1),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }

    #[test]
    fn reorder_needs_a_shared_parent() {
        let fx = fixture();
        // The expanded parent is a root; Smoke lives inside it.
        let got = classify(
            NodeRef::Folder(fx.parent),
            upper_of(3),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }

    #[test]
    fn dragged_row_itself_is_never_a_target() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.smoke),
            center_of(3),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }

    #[test]
    fn descendant_center_is_rejected_by_the_cycle_guard() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.parent),
            center_of(3),
            &fx.layout,
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }

    #[test]
    fn empty_layout_never_classifies() {
        let fx = fixture();
        let got = classify(
            NodeRef::Folder(fx.smoke),
            Point::new(0.0, 0.0),
            &RowLayout::default(),
            &fx.roots,
            0.5,
        );
        assert_eq!(got, DropClassification::None);
    }
}
