//! # testdeck-service
//!
//! Business logic service layer for TestDeck. Each service orchestrates
//! the repositories to implement application-level use cases; the
//! [`CatalogService`] adapter exposes them to the organizer as a
//! [`TreeCatalog`](testdeck_organizer::TreeCatalog), so the HTTP surface
//! and the drag engine issue identical commands.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod case;
pub mod catalog;
pub mod folder;
pub mod naming;

pub use case::{CaseService, VersionService};
pub use catalog::CatalogService;
pub use folder::{FolderService, TreeService};
