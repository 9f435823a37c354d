//! Core type definitions used across the TestDeck workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
