//! Test case repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use testdeck_core::error::AppError;
use testdeck_core::result::AppResult;
use testdeck_core::types::pagination::{PageRequest, PageResponse};
use testdeck_entity::case::model::{CaseContent, CreateTestCase, TestCase};
use testdeck_entity::case::version::CaseVersion;

use super::{db_error, lock_tree};

/// Repository for test case CRUD, sibling ordering, and the append-only
/// version history.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new test case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a test case by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TestCase>> {
        sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find test case", e))
    }

    /// List all test cases in sibling order, for tree assembly.
    pub async fn find_all(&self) -> AppResult<Vec<TestCase>> {
        sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list test cases", e))
    }

    /// List the test cases in a folder with pagination, in sibling order.
    pub async fn find_by_folder(
        &self,
        folder_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<TestCase>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM test_cases WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count test cases", e))?;

        let cases = sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases WHERE folder_id = $1 \
             ORDER BY position ASC, created_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(folder_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list test cases", e))?;

        Ok(PageResponse::new(
            cases,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the names already taken inside a folder.
    pub async fn find_names_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM test_cases WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list case names", e))
    }

    /// Create a test case at the end of its folder, together with its
    /// version 1 snapshot.
    pub async fn create(&self, data: &CreateTestCase) -> AppResult<TestCase> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let case = sqlx::query_as::<_, TestCase>(
            "INSERT INTO test_cases (folder_id, name, position, description, preconditions, \
                                     steps, expected_result, current_version) \
             VALUES ($1, $2, (SELECT COALESCE(MAX(position) + 1, 0) FROM test_cases \
                              WHERE folder_id = $1), $3, $4, $5, $6, 1) \
             RETURNING *",
        )
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(&data.content.description)
        .bind(&data.content.preconditions)
        .bind(&data.content.steps)
        .bind(&data.content.expected_result)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_name_key") =>
            {
                AppError::conflict(format!(
                    "Test case '{}' already exists in this folder",
                    data.name
                ))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_fkey") =>
            {
                AppError::not_found(format!("Folder {} not found", data.folder_id))
            }
            _ => db_error("Failed to create test case", e),
        })?;

        sqlx::query(
            "INSERT INTO case_versions (case_id, version_number, name, description, \
                                        preconditions, steps, expected_result, created_by) \
             VALUES ($1, 1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(case.id)
        .bind(&case.name)
        .bind(&case.description)
        .bind(&case.preconditions)
        .bind(&case.steps)
        .bind(&case.expected_result)
        .bind(data.created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record initial version", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(case)
    }

    /// Rename a test case. The rename is not recorded in the version history.
    pub async fn rename(&self, case_id: Uuid, new_name: &str) -> AppResult<TestCase> {
        sqlx::query_as::<_, TestCase>(
            "UPDATE test_cases SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(case_id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_name_key") =>
            {
                AppError::conflict(format!(
                    "Test case '{new_name}' already exists in this folder"
                ))
            }
            _ => db_error("Failed to rename test case", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))
    }

    /// Move a test case into another folder, appending it at the end.
    pub async fn move_case(&self, case_id: Uuid, folder_id: Uuid) -> AppResult<TestCase> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let case = sqlx::query_as::<_, TestCase>(
            "UPDATE test_cases SET folder_id = $2, \
             position = (SELECT COALESCE(MAX(position) + 1, 0) FROM test_cases \
                         WHERE folder_id = $2 AND id != $1), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(case_id)
        .bind(folder_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_name_key") =>
            {
                AppError::conflict(
                    "A test case with the same name already exists in the target folder",
                )
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_fkey") =>
            {
                AppError::not_found(format!("Folder {folder_id} not found"))
            }
            _ => db_error("Failed to move test case", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(case)
    }

    /// Place a test case before or after a sibling reference row.
    pub async fn reorder(
        &self,
        case_id: Uuid,
        reference_id: Uuid,
        after: bool,
    ) -> AppResult<()> {
        if case_id == reference_id {
            return Err(AppError::validation(
                "Cannot reorder a test case against itself",
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let dragged = sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to find test case", e))?
            .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))?;

        let reference = sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE id = $1")
            .bind(reference_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to find test case", e))?
            .ok_or_else(|| AppError::not_found(format!("Test case {reference_id} not found")))?;

        if dragged.folder_id != reference.folder_id {
            return Err(AppError::validation(
                "Reorder reference must be a sibling of the moved test case",
            ));
        }

        // Close the gap left by the dragged row, then open one at the target
        // slot. The dragged row keeps a stale position until the final update.
        sqlx::query(
            "UPDATE test_cases SET position = position - 1 \
             WHERE folder_id = $1 AND position > $2",
        )
        .bind(dragged.folder_id)
        .bind(dragged.position)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to shift siblings", e))?;

        let reference_position = if reference.position > dragged.position {
            reference.position - 1
        } else {
            reference.position
        };
        let target = if after {
            reference_position + 1
        } else {
            reference_position
        };

        sqlx::query(
            "UPDATE test_cases SET position = position + 1 \
             WHERE folder_id = $1 AND position >= $2 AND id != $3",
        )
        .bind(dragged.folder_id)
        .bind(target)
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to shift siblings", e))?;

        sqlx::query("UPDATE test_cases SET position = $2, updated_at = NOW() WHERE id = $1")
            .bind(case_id)
            .bind(target)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to place test case", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    /// Delete a test case (cascades to its version history).
    pub async fn delete(&self, case_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let result = sqlx::query("DELETE FROM test_cases WHERE id = $1")
            .bind(case_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete test case", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Copy a test case within its folder under a new name, restarting its
    /// history at version 1.
    pub async fn duplicate(
        &self,
        case_id: Uuid,
        new_name: &str,
        created_by: Uuid,
    ) -> AppResult<TestCase> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let copy = sqlx::query_as::<_, TestCase>(
            "INSERT INTO test_cases (folder_id, name, position, description, preconditions, \
                                     steps, expected_result, current_version) \
             SELECT folder_id, $2, \
                    (SELECT COALESCE(MAX(position) + 1, 0) FROM test_cases \
                     WHERE folder_id = source.folder_id), \
                    description, preconditions, steps, expected_result, 1 \
             FROM test_cases source WHERE id = $1 \
             RETURNING *",
        )
        .bind(case_id)
        .bind(new_name)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_folder_id_name_key") =>
            {
                AppError::conflict(format!(
                    "Test case '{new_name}' already exists in this folder"
                ))
            }
            _ => db_error("Failed to copy test case", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))?;

        sqlx::query(
            "INSERT INTO case_versions (case_id, version_number, name, description, \
                                        preconditions, steps, expected_result, created_by) \
             VALUES ($1, 1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(copy.id)
        .bind(&copy.name)
        .bind(&copy.description)
        .bind(&copy.preconditions)
        .bind(&copy.steps)
        .bind(&copy.expected_result)
        .bind(created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record initial version", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(copy)
    }

    // -- Version history --

    /// Append the next version snapshot and update the live record.
    ///
    /// The live row is locked for the duration of the transaction, so
    /// concurrent updates to the same case are applied one at a time and
    /// version numbers stay contiguous.
    pub async fn record_update(
        &self,
        case_id: Uuid,
        content: &CaseContent,
        created_by: Uuid,
    ) -> AppResult<CaseVersion> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let case = sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases WHERE id = $1 FOR UPDATE",
        )
        .bind(case_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to lock test case", e))?
        .ok_or_else(|| AppError::not_found(format!("Test case {case_id} not found")))?;

        let next_version = case.current_version + 1;

        let version = sqlx::query_as::<_, CaseVersion>(
            "INSERT INTO case_versions (case_id, version_number, name, description, \
                                        preconditions, steps, expected_result, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(case_id)
        .bind(next_version)
        .bind(&case.name)
        .bind(&content.description)
        .bind(&content.preconditions)
        .bind(&content.steps)
        .bind(&content.expected_result)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to append version", e))?;

        sqlx::query(
            "UPDATE test_cases SET description = $2, preconditions = $3, steps = $4, \
             expected_result = $5, current_version = $6, updated_at = NOW() WHERE id = $1",
        )
        .bind(case_id)
        .bind(&content.description)
        .bind(&content.preconditions)
        .bind(&content.steps)
        .bind(&content.expected_result)
        .bind(next_version)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update test case", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(version)
    }

    /// List all versions of a test case, newest first.
    pub async fn find_versions(&self, case_id: Uuid) -> AppResult<Vec<CaseVersion>> {
        sqlx::query_as::<_, CaseVersion>(
            "SELECT * FROM case_versions WHERE case_id = $1 ORDER BY version_number DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list versions", e))
    }

    /// Find a specific version of a test case.
    pub async fn find_version(
        &self,
        case_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<CaseVersion>> {
        sqlx::query_as::<_, CaseVersion>(
            "SELECT * FROM case_versions WHERE case_id = $1 AND version_number = $2",
        )
        .bind(case_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find version", e))
    }
}
