//! # testdeck-organizer
//!
//! The interactive core of TestDeck's hierarchical organizer: flattening
//! the folder/test-case forest into visible rows, validating proposed
//! names against the visible scope, guarding folder moves against
//! ancestry cycles, and driving the pointer-based drag reorganization
//! state machine.
//!
//! Everything here is UI-toolkit agnostic. The display layer feeds the
//! engine pointer positions and per-row pixel bands; committed drops are
//! issued against the [`TreeCatalog`] collaborator as exactly one
//! repository command per completed gesture.

pub mod catalog;
pub mod cycle;
pub mod engine;
pub mod geometry;
pub mod naming;
pub mod projection;
pub mod session;

pub use catalog::TreeCatalog;
pub use cycle::is_legal_move;
pub use engine::{DragEngine, DragOutcome, DragState, DragTuning};
pub use geometry::{BandZone, Point, RowBand, RowLayout};
pub use naming::{validate_name, validate_name_text};
pub use projection::{NodeRef, ProjectedRow, RowKind, project};
pub use session::{DragSession, DropClassification, Placement};
