//! Test-case domain entities.

pub mod model;
pub mod version;

pub use model::{CaseContent, CreateTestCase, TestCase};
pub use version::CaseVersion;
