//! Test case and version history services.

pub mod service;
pub mod version;

pub use service::CaseService;
pub use version::VersionService;
