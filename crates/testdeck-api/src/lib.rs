//! # testdeck-api
//!
//! HTTP API layer for TestDeck built on Axum.
//!
//! Provides the REST endpoints for the catalog operations (tree listing,
//! folder and test case CRUD, moves, reorders, duplication, version
//! history), plus DTOs, extractors, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
