//! # testdeck-database
//!
//! PostgreSQL connection pool management and concrete repository
//! implementations for the TestDeck tree and version tables.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
