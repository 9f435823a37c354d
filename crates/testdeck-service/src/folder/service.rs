//! Folder CRUD, move, duplicate, and reorder operations.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use testdeck_core::error::{AppError, ErrorKind};
use testdeck_core::result::AppResult;
use testdeck_database::repositories::folder::FolderRepository;
use testdeck_entity::folder::{CreateFolder, Folder};
use testdeck_organizer::naming::validate_name_text;
use testdeck_organizer::session::Placement;

use crate::naming::duplicate_name;

/// Manages folder operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Creates a folder at the end of its sibling scope.
    pub async fn create_folder(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Folder> {
        validate_name_text(name)?;

        if let Some(parent_id) = parent_id {
            self.get_folder(parent_id).await?;
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                parent_id,
                name: name.to_string(),
            })
            .await?;

        info!(
            folder_id = %folder.id,
            parent_id = ?parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder. Contents are untouched.
    pub async fn rename_folder(&self, folder_id: Uuid, new_name: &str) -> AppResult<Folder> {
        validate_name_text(new_name)?;

        let folder = self.folder_repo.rename(folder_id, new_name).await?;

        info!(folder_id = %folder_id, new_name = %new_name, "Folder renamed");
        Ok(folder)
    }

    /// Moves a folder under a new parent (`None` = to the root level).
    pub async fn move_folder(
        &self,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        if new_parent_id == Some(folder_id) {
            warn!(folder_id = %folder_id, "Rejected move of a folder into itself");
            return Err(AppError::illegal_move("Cannot move a folder into itself"));
        }

        if let Some(parent_id) = new_parent_id {
            self.get_folder(parent_id).await?;
        }

        match self.folder_repo.move_folder(folder_id, new_parent_id).await {
            Ok(folder) => {
                info!(
                    folder_id = %folder_id,
                    new_parent_id = ?new_parent_id,
                    "Folder moved"
                );
                Ok(folder)
            }
            Err(e) if e.kind == ErrorKind::IllegalMove => {
                warn!(
                    folder_id = %folder_id,
                    new_parent_id = ?new_parent_id,
                    "Rejected move of a folder into its own subtree"
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a folder, its subtree, and all contained test cases.
    pub async fn delete_folder(&self, folder_id: Uuid) -> AppResult<()> {
        if !self.folder_repo.delete(folder_id).await? {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        info!(folder_id = %folder_id, "Folder deleted");
        Ok(())
    }

    /// Deep-copies a folder subtree next to the original.
    ///
    /// The copy takes the first free `" (Copy)"`-suffixed name in its
    /// sibling scope. Copied test cases restart their history at
    /// version 1, authored by `author`.
    pub async fn duplicate_folder(&self, folder_id: Uuid, author: Uuid) -> AppResult<Folder> {
        let source = self.get_folder(folder_id).await?;

        let siblings = self.folder_repo.find_children(source.parent_id).await?;
        let taken: Vec<String> = siblings.into_iter().map(|f| f.name).collect();
        let new_name = duplicate_name(&source.name, &taken);

        let copy = self
            .folder_repo
            .duplicate_subtree(folder_id, &new_name, author)
            .await?;

        info!(
            source_id = %folder_id,
            copy_id = %copy.id,
            copy_name = %copy.name,
            "Folder duplicated"
        );

        Ok(copy)
    }

    /// Places a folder before or after a sibling.
    pub async fn reorder(
        &self,
        folder_id: Uuid,
        reference_id: Uuid,
        placement: Placement,
    ) -> AppResult<()> {
        let after = matches!(placement, Placement::After);
        self.folder_repo.reorder(folder_id, reference_id, after).await?;

        info!(
            folder_id = %folder_id,
            reference_id = %reference_id,
            after,
            "Folder reordered"
        );
        Ok(())
    }
}
