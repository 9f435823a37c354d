//! In-memory catalog fixture shared by the organizer's integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use testdeck_core::{AppError, AppResult};
use testdeck_entity::case::{CaseContent, CaseVersion, CreateTestCase, TestCase};
use testdeck_entity::folder::{Folder, TreeNode};
use testdeck_organizer::{NodeRef, Placement, TreeCatalog};
use uuid::Uuid;

/// Every call the fixture receives, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveFolder {
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    },
    MoveCase {
        case_id: Uuid,
        folder_id: Uuid,
    },
    Reorder {
        node: NodeRef,
        reference: NodeRef,
        placement: Placement,
    },
    RecordUpdate {
        case_id: Uuid,
        version: i32,
    },
    Other(&'static str),
}

/// A [`TreeCatalog`] that records every call and answers with canned
/// rows, so tests can assert exactly which commands a gesture issued.
#[derive(Default)]
pub struct RecordingCatalog {
    commands: Mutex<Vec<Command>>,
    versions: Mutex<HashMap<Uuid, i32>>,
    fail_mutations: AtomicBool,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every structural mutation answer with a conflict.
    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    /// The calls received so far, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }

    fn mutation_guard(&self) -> AppResult<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(AppError::conflict("the target no longer exists"))
        } else {
            Ok(())
        }
    }
}

pub fn dummy_folder(id: Uuid, parent_id: Option<Uuid>) -> Folder {
    let now = Utc::now();
    Folder {
        id,
        parent_id,
        name: "folder".to_string(),
        position: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn dummy_case(id: Uuid, folder_id: Uuid, current_version: i32) -> TestCase {
    let now = Utc::now();
    TestCase {
        id,
        folder_id,
        name: "case".to_string(),
        position: 0,
        description: None,
        preconditions: None,
        steps: None,
        expected_result: None,
        current_version,
        created_at: now,
        updated_at: now,
    }
}

pub fn dummy_version(case_id: Uuid, version_number: i32, author: Uuid) -> CaseVersion {
    CaseVersion {
        id: Uuid::new_v4(),
        case_id,
        version_number,
        name: "case".to_string(),
        description: None,
        preconditions: None,
        steps: None,
        expected_result: None,
        created_by: author,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl TreeCatalog for RecordingCatalog {
    async fn list_folders(&self) -> AppResult<Vec<TreeNode>> {
        self.record(Command::Other("list_folders"));
        Ok(Vec::new())
    }

    async fn create_folder(&self, parent_id: Option<Uuid>, _name: &str) -> AppResult<Folder> {
        self.record(Command::Other("create_folder"));
        Ok(dummy_folder(Uuid::new_v4(), parent_id))
    }

    async fn rename_folder(&self, folder_id: Uuid, _name: &str) -> AppResult<Folder> {
        self.record(Command::Other("rename_folder"));
        Ok(dummy_folder(folder_id, None))
    }

    async fn delete_folder(&self, _folder_id: Uuid) -> AppResult<()> {
        self.record(Command::Other("delete_folder"));
        Ok(())
    }

    async fn duplicate_folder(&self, folder_id: Uuid, _author: Uuid) -> AppResult<Folder> {
        self.record(Command::Other("duplicate_folder"));
        Ok(dummy_folder(folder_id, None))
    }

    async fn move_folder(
        &self,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        self.record(Command::MoveFolder {
            folder_id,
            new_parent_id,
        });
        self.mutation_guard()?;
        Ok(dummy_folder(folder_id, new_parent_id))
    }

    async fn create_test_case(&self, request: CreateTestCase) -> AppResult<TestCase> {
        self.record(Command::Other("create_test_case"));
        Ok(dummy_case(Uuid::new_v4(), request.folder_id, 1))
    }

    async fn rename_test_case(&self, case_id: Uuid, _name: &str) -> AppResult<TestCase> {
        self.record(Command::Other("rename_test_case"));
        Ok(dummy_case(case_id, Uuid::new_v4(), 1))
    }

    async fn delete_test_case(&self, _case_id: Uuid) -> AppResult<()> {
        self.record(Command::Other("delete_test_case"));
        Ok(())
    }

    async fn duplicate_test_case(&self, case_id: Uuid, _author: Uuid) -> AppResult<TestCase> {
        self.record(Command::Other("duplicate_test_case"));
        Ok(dummy_case(case_id, Uuid::new_v4(), 1))
    }

    async fn move_test_case(&self, case_id: Uuid, folder_id: Uuid) -> AppResult<TestCase> {
        self.record(Command::MoveCase { case_id, folder_id });
        self.mutation_guard()?;
        Ok(dummy_case(case_id, folder_id, 1))
    }

    async fn reorder_sibling(
        &self,
        node: NodeRef,
        reference: NodeRef,
        placement: Placement,
    ) -> AppResult<()> {
        self.record(Command::Reorder {
            node,
            reference,
            placement,
        });
        self.mutation_guard()
    }

    async fn record_update(
        &self,
        case_id: Uuid,
        _content: CaseContent,
        author: Uuid,
    ) -> AppResult<CaseVersion> {
        // One lock guards read-increment-write, so concurrent appends
        // to the same case always take successive numbers.
        let version = {
            let mut versions = self.versions.lock().unwrap();
            let next = versions.entry(case_id).or_insert(0);
            *next += 1;
            *next
        };
        self.record(Command::RecordUpdate { case_id, version });
        Ok(dummy_version(case_id, version, author))
    }

    async fn list_versions(&self, _case_id: Uuid) -> AppResult<Vec<CaseVersion>> {
        self.record(Command::Other("list_versions"));
        Ok(Vec::new())
    }
}
