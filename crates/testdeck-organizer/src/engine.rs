//! The drag reorganization state machine.

use testdeck_core::AppResult;
use testdeck_entity::folder::TreeNode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::TreeCatalog;
use crate::cycle::is_legal_move;
use crate::geometry::{DEFAULT_DRAG_THRESHOLD, DEFAULT_HIERARCHY_BAND, Point, RowLayout};
use crate::projection::NodeRef;
use crate::session::{DragSession, DropClassification, Placement};

/// Tuning knobs for drag detection and band classification.
#[derive(Debug, Clone)]
pub struct DragTuning {
    /// Pixel distance a press must travel before it becomes a drag.
    pub start_threshold: f32,
    /// Central fraction of a row's height treated as the hierarchy band.
    pub hierarchy_band: f32,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            start_threshold: DEFAULT_DRAG_THRESHOLD,
            hierarchy_band: DEFAULT_HIERARCHY_BAND,
        }
    }
}

impl DragTuning {
    /// Override the start threshold.
    #[must_use]
    pub fn with_threshold(mut self, pixels: f32) -> Self {
        self.start_threshold = pixels;
        self
    }

    /// Override the hierarchy band fraction (clamped to 0..=1).
    #[must_use]
    pub fn with_hierarchy_band(mut self, fraction: f32) -> Self {
        self.hierarchy_band = fraction.clamp(0.0, 1.0);
        self
    }
}

/// Lifecycle phase of the current gesture.
#[derive(Debug, Clone)]
pub enum DragState {
    /// No gesture in progress.
    Idle,
    /// Pointer is down but has not travelled past the threshold.
    Pressed(DragSession),
    /// A drag is in progress.
    Dragging(DragSession),
}

impl DragState {
    /// Whether no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

/// How a completed gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The gesture ended without a commit: never became a drag, had no
    /// legal target, or failed the final legality re-check.
    Cancelled,
    /// The dragged node was reparented into `new_parent`.
    Moved {
        /// The node that moved.
        node: NodeRef,
        /// Its new parent folder.
        new_parent: Uuid,
    },
    /// The dragged node was placed next to a sibling.
    Reordered {
        /// The node that moved.
        node: NodeRef,
        /// The sibling it was placed relative to.
        reference: NodeRef,
        /// Before or after that sibling.
        placement: Placement,
    },
}

/// Pointer-driven state machine that turns row gestures into exactly one
/// repository command per completed drag.
///
/// The machine holds at most one session; pointer-downs while a gesture
/// is active are ignored. It never mutates the tree itself: a committed
/// drop issues a single [`TreeCatalog`] call and reports the outcome,
/// and a failure from the catalog is handed back to the caller with the
/// machine already reset to idle.
#[derive(Debug, Default)]
pub struct DragEngine {
    tuning: DragTuning,
    state: DragState,
}

impl DragEngine {
    /// Create an engine with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit tuning.
    pub fn with_tuning(tuning: DragTuning) -> Self {
        Self {
            tuning,
            state: DragState::Idle,
        }
    }

    /// The current lifecycle phase.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active session, if a gesture is in progress.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Pressed(session) | DragState::Dragging(session) => Some(session),
        }
    }

    /// Whether the threshold has been crossed and a drag is live.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Begin a gesture on `node`.
    ///
    /// Returns false (and changes nothing) if a gesture is already in
    /// progress.
    pub fn pointer_down(&mut self, node: NodeRef, at: Point) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        self.state = DragState::Pressed(DragSession::new(node, at));
        true
    }

    /// Track a pointer move, promoting a press to a drag once the travel
    /// distance exceeds the threshold, and reclassifying the drop target
    /// on every dragging move.
    ///
    /// Returns the classification for the current position so the caller
    /// can render the drop affordance; [`DropClassification::None`] while
    /// not dragging.
    pub fn pointer_move(
        &mut self,
        at: Point,
        layout: &RowLayout,
        roots: &[TreeNode],
    ) -> DropClassification {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DropClassification::None,
            DragState::Pressed(mut session) => {
                session.pointer = at;
                if session.travel() > self.tuning.start_threshold {
                    let classification =
                        session.reclassify(layout, roots, self.tuning.hierarchy_band);
                    debug!(dragged = ?session.dragged, "drag started");
                    self.state = DragState::Dragging(session);
                    classification
                } else {
                    self.state = DragState::Pressed(session);
                    DropClassification::None
                }
            }
            DragState::Dragging(mut session) => {
                session.pointer = at;
                let classification =
                    session.reclassify(layout, roots, self.tuning.hierarchy_band);
                self.state = DragState::Dragging(session);
                classification
            }
        }
    }

    /// Abort the gesture (Escape, focus loss). Nothing is committed and
    /// nothing observable happens beyond the engine returning to idle.
    pub fn cancel(&mut self) {
        if !self.state.is_idle() {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Finish the gesture.
    ///
    /// A press that never became a drag is a click: nothing is issued. A
    /// drag commits its stored classification as exactly one catalog
    /// command, after re-validating hierarchy legality against `roots`,
    /// which the caller supplies as the latest forest snapshot. Catalog
    /// errors propagate unchanged; in every path the engine is idle when
    /// this returns.
    pub async fn pointer_up<C>(
        &mut self,
        roots: &[TreeNode],
        catalog: &C,
    ) -> AppResult<DragOutcome>
    where
        C: TreeCatalog + ?Sized,
    {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        let DragState::Dragging(session) = state else {
            return Ok(DragOutcome::Cancelled);
        };
        match session.classification {
            DropClassification::None => Ok(DragOutcome::Cancelled),
            DropClassification::Hierarchy { parent } => {
                if !is_legal_move(roots, session.dragged, NodeRef::Folder(parent)) {
                    warn!(
                        dragged = ?session.dragged,
                        parent = %parent,
                        "hierarchy drop no longer legal at release"
                    );
                    return Ok(DragOutcome::Cancelled);
                }
                match session.dragged {
                    NodeRef::Folder(id) => {
                        catalog.move_folder(id, Some(parent)).await?;
                    }
                    NodeRef::TestCase(id) => {
                        catalog.move_test_case(id, parent).await?;
                    }
                }
                debug!(node = ?session.dragged, parent = %parent, "drag committed");
                Ok(DragOutcome::Moved {
                    node: session.dragged,
                    new_parent: parent,
                })
            }
            DropClassification::Reorder {
                reference,
                placement,
            } => {
                catalog
                    .reorder_sibling(session.dragged, reference, placement)
                    .await?;
                debug!(node = ?session.dragged, reference = ?reference, "drag committed");
                Ok(DragOutcome::Reordered {
                    node: session.dragged,
                    reference,
                    placement,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use uuid::Uuid;

    fn two_roots() -> (Vec<TreeNode>, Uuid, Uuid) {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let roots = vec![TreeNode::new(a, "Alpha"), TreeNode::new(b, "Beta")];
        (roots, a, b)
    }

    #[test]
    fn press_below_threshold_stays_pressed() {
        let (roots, a, _) = two_roots();
        let layout = RowLayout::uniform(&project(&roots), 20.0);
        let mut engine = DragEngine::new();
        assert!(engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0)));
        let got = engine.pointer_move(Point::new(3.0, 10.0), &layout, &roots);
        assert_eq!(got, DropClassification::None);
        assert!(!engine.is_dragging());
        assert!(matches!(engine.state(), DragState::Pressed(_)));
    }

    #[test]
    fn exact_threshold_distance_is_not_a_drag() {
        let (roots, a, _) = two_roots();
        let layout = RowLayout::uniform(&project(&roots), 20.0);
        let mut engine = DragEngine::new();
        engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0));
        engine.pointer_move(Point::new(5.0, 10.0), &layout, &roots);
        assert!(!engine.is_dragging());
        engine.pointer_move(Point::new(5.1, 10.0), &layout, &roots);
        assert!(engine.is_dragging());
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let (roots, a, b) = two_roots();
        let _ = roots;
        let mut engine = DragEngine::new();
        assert!(engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0)));
        assert!(!engine.pointer_down(NodeRef::Folder(b), Point::new(0.0, 30.0)));
        assert_eq!(engine.session().unwrap().dragged, NodeRef::Folder(a));
    }

    #[test]
    fn cancel_returns_to_idle_from_any_phase() {
        let (roots, a, _) = two_roots();
        let layout = RowLayout::uniform(&project(&roots), 20.0);
        let mut engine = DragEngine::new();
        engine.cancel();
        assert!(engine.state().is_idle());

        engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0));
        engine.cancel();
        assert!(engine.state().is_idle());

        engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0));
        engine.pointer_move(Point::new(40.0, 10.0), &layout, &roots);
        assert!(engine.is_dragging());
        engine.cancel();
        assert!(engine.state().is_idle());
    }

    #[test]
    fn dragging_move_updates_the_stored_classification() {
        let (roots, a, b) = two_roots();
        let layout = RowLayout::uniform(&project(&roots), 20.0);
        let mut engine = DragEngine::new();
        engine.pointer_down(NodeRef::Folder(a), Point::new(0.0, 10.0));
        let got = engine.pointer_move(Point::new(0.0, 30.0), &layout, &roots);
        assert_eq!(got, DropClassification::Hierarchy { parent: b });
        assert_eq!(engine.session().unwrap().classification, got);
    }
}
