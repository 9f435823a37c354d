//! Route handlers organized by domain.

pub mod case;
pub mod folder;
pub mod health;
pub mod version;
