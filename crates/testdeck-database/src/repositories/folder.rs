//! Folder repository implementation.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use testdeck_core::error::AppError;
use testdeck_core::result::AppResult;
use testdeck_entity::folder::model::{CreateFolder, Folder};

use super::{db_error, lock_tree};

/// Repository for folder CRUD, tree queries, and sibling ordering.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find folder", e))
    }

    /// List all folders in sibling order, for tree assembly.
    pub async fn find_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list folders", e))
    }

    /// List the direct children of a parent in sibling order.
    ///
    /// `None` lists the root folders.
    pub async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id IS NOT DISTINCT FROM $1 \
             ORDER BY position ASC, created_at ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list children", e))
    }

    /// Collect the IDs of a folder's subtree, the folder itself included.
    pub async fn find_subtree_ids(&self, folder_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "WITH RECURSIVE subtree AS ( \
                SELECT id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
             ) SELECT id FROM subtree",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to walk subtree", e))
    }

    /// Create a new folder at the end of its sibling scope.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (parent_id, name, position) \
             VALUES ($1, $2, (SELECT COALESCE(MAX(position) + 1, 0) FROM folders \
                              WHERE parent_id IS NOT DISTINCT FROM $1)) \
             RETURNING *",
        )
        .bind(data.parent_id)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.constraint(),
                    Some("folders_parent_id_name_key" | "folders_root_name_key")
                ) =>
            {
                AppError::conflict(format!("Folder '{}' already exists at this level", data.name))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_parent_id_fkey") =>
            {
                AppError::not_found("Parent folder not found")
            }
            _ => db_error("Failed to create folder", e),
        })
    }

    /// Rename a folder.
    pub async fn rename(&self, folder_id: Uuid, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.constraint(),
                    Some("folders_parent_id_name_key" | "folders_root_name_key")
                ) =>
            {
                AppError::conflict(format!("Folder '{new_name}' already exists at this level"))
            }
            _ => db_error("Failed to rename folder", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Move a folder under a new parent (`None` = to the root level),
    /// appending it at the end of the new sibling scope.
    ///
    /// The ancestry check runs inside the same transaction as the update,
    /// under the tree lock, so a concurrent move cannot slip a cycle past it.
    pub async fn move_folder(
        &self,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        if let Some(parent_id) = new_parent_id {
            let inside_subtree: Option<Uuid> = sqlx::query_scalar(
                "WITH RECURSIVE subtree AS ( \
                    SELECT id FROM folders WHERE id = $1 \
                    UNION ALL \
                    SELECT f.id FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
                 ) SELECT id FROM subtree WHERE id = $2",
            )
            .bind(folder_id)
            .bind(parent_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to check ancestry", e))?;

            if inside_subtree.is_some() {
                return Err(AppError::illegal_move(
                    "Cannot move a folder into its own subtree",
                ));
            }
        }

        let folder = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, \
             position = (SELECT COALESCE(MAX(position) + 1, 0) FROM folders \
                         WHERE parent_id IS NOT DISTINCT FROM $2 AND id != $1), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_parent_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.constraint(),
                    Some("folders_parent_id_name_key" | "folders_root_name_key")
                ) =>
            {
                AppError::conflict("A folder with the same name already exists at the target level")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_parent_id_fkey") =>
            {
                AppError::not_found("Target folder not found")
            }
            _ => db_error("Failed to move folder", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(folder)
    }

    /// Place a folder before or after a sibling reference row.
    pub async fn reorder(
        &self,
        folder_id: Uuid,
        reference_id: Uuid,
        after: bool,
    ) -> AppResult<()> {
        if folder_id == reference_id {
            return Err(AppError::validation("Cannot reorder a folder against itself"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let dragged = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(folder_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to find folder", e))?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let reference = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(reference_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to find folder", e))?
            .ok_or_else(|| AppError::not_found(format!("Folder {reference_id} not found")))?;

        if dragged.parent_id != reference.parent_id {
            return Err(AppError::validation(
                "Reorder reference must be a sibling of the moved folder",
            ));
        }

        // Close the gap left by the dragged row, then open one at the target
        // slot. The dragged row keeps a stale position until the final update.
        sqlx::query(
            "UPDATE folders SET position = position - 1 \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND position > $2",
        )
        .bind(dragged.parent_id)
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
            "UPDATE folders SET position = position + 1 \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND position >= $2 AND id != $3",
        )
        .bind(dragged.parent_id)
        .bind(target)
        .bind(folder_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to shift siblings", e))?;

        sqlx::query("UPDATE folders SET position = $2, updated_at = NOW() WHERE id = $1")
            .bind(folder_id)
            .bind(target)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to place folder", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    /// Delete a folder (cascades to the subtree, its cases, and their
    /// version history).
    pub async fn delete(&self, folder_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(folder_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete folder", e))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Deep-copy a folder subtree next to the original.
    ///
    /// The copied root takes `new_name` and the last position in its sibling
    /// scope; descendants keep their names and relative order. Copied test
    /// cases restart their history at version 1, authored by `created_by`.
    pub async fn duplicate_subtree(
        &self,
        folder_id: Uuid,
        new_name: &str,
        created_by: Uuid,
    ) -> AppResult<Folder> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        lock_tree(&mut tx).await?;

        // Parents sort before their children, so the ID map below is always
        // populated before it is read.
        let subtree = sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE subtree AS ( \
                SELECT f.*, 0 AS rel_depth FROM folders f WHERE f.id = $1 \
                UNION ALL \
                SELECT f.*, s.rel_depth + 1 FROM folders f \
                INNER JOIN subtree s ON f.parent_id = s.id \
             ) SELECT * FROM subtree ORDER BY rel_depth ASC, position ASC",
        )
        .bind(folder_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to walk subtree", e))?;

        if subtree.is_empty() {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        let mut id_map: HashMap<Uuid, Uuid> = HashMap::new();
        let mut new_root: Option<Folder> = None;

        for source in &subtree {
            let new_id = Uuid::new_v4();
            id_map.insert(source.id, new_id);

            let created = if source.id == folder_id {
                sqlx::query_as::<_, Folder>(
                    "INSERT INTO folders (id, parent_id, name, position) \
                     VALUES ($1, $2, $3, (SELECT COALESCE(MAX(position) + 1, 0) FROM folders \
                                          WHERE parent_id IS NOT DISTINCT FROM $2)) \
                     RETURNING *",
                )
                .bind(new_id)
                .bind(source.parent_id)
                .bind(new_name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| match e {
                    sqlx::Error::Database(ref db_err)
                        if matches!(
                            db_err.constraint(),
                            Some("folders_parent_id_name_key" | "folders_root_name_key")
                        ) =>
                    {
                        AppError::conflict(format!(
                            "Folder '{new_name}' already exists at this level"
                        ))
                    }
                    _ => db_error("Failed to copy folder", e),
                })?
            } else {
                let new_parent = source
                    .parent_id
                    .and_then(|p| id_map.get(&p).copied())
                    .ok_or_else(|| AppError::internal("Subtree copy visited a child first"))?;

                sqlx::query_as::<_, Folder>(
                    "INSERT INTO folders (id, parent_id, name, position) \
                     VALUES ($1, $2, $3, $4) RETURNING *",
                )
                .bind(new_id)
                .bind(new_parent)
                .bind(&source.name)
                .bind(source.position)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to copy folder", e))?
            };

            if source.id == folder_id {
                new_root = Some(created);
            }

            sqlx::query(
                "INSERT INTO test_cases (folder_id, name, position, description, preconditions, \
                                         steps, expected_result, current_version) \
                 SELECT $2, name, position, description, preconditions, \
                        steps, expected_result, 1 \
                 FROM test_cases WHERE folder_id = $1",
            )
            .bind(source.id)
            .bind(new_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to copy test cases", e))?;

            sqlx::query(
                "INSERT INTO case_versions (case_id, version_number, name, description, \
                                            preconditions, steps, expected_result, created_by) \
                 SELECT id, 1, name, description, preconditions, steps, expected_result, $2 \
                 FROM test_cases WHERE folder_id = $1",
            )
            .bind(new_id)
            .bind(created_by)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to record initial versions", e))?;
        }

        let root = new_root
            .ok_or_else(|| AppError::internal("Duplicated subtree lost its root"))?;

        tx.commit().await.map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(root)
    }
}
