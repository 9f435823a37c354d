//! Name validation against the visible projection.

use testdeck_core::{AppError, AppResult};

use crate::projection::{NodeRef, ProjectedRow, RowKind};

/// Minimum name length, in characters.
pub const MIN_NAME_CHARS: usize = 2;
/// Maximum name length, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Validate a proposed folder or test-case name.
///
/// Rules are checked in order and the first violation wins:
///
/// 1. Length: the character count must be within
///    [`MIN_NAME_CHARS`]..=[`MAX_NAME_CHARS`].
/// 2. Character classes: letters of any script, digits, and whitespace
///    are allowed; punctuation and symbols are not.
/// 3. Uniqueness: among visible rows of the same kind at `depth`, no row
///    other than `exclude` may already bear exactly this name. Rows of
///    the other kind and rows at other depths never conflict.
///
/// The uniqueness scope is the projection the caller is looking at, so
/// names hidden inside collapsed subtrees do not conflict.
pub fn validate_name(
    projection: &[ProjectedRow],
    name: &str,
    kind: RowKind,
    depth: u16,
    exclude: Option<NodeRef>,
) -> AppResult<()> {
    validate_name_text(name)?;

    let taken = projection
        .iter()
        .filter(|row| row.depth == depth && row.node.kind() == kind)
        .filter(|row| Some(row.node) != exclude)
        .any(|row| row.name == name);
    if taken {
        return Err(AppError::validation(format!(
            "A {} named \"{name}\" already exists at this level",
            kind.label()
        )));
    }

    Ok(())
}

/// Validate a name's length and character classes without a projection.
///
/// This is the uniqueness-free half of [`validate_name`]. Server-side
/// callers use it and leave uniqueness to the database indexes, which see
/// the whole tree rather than the visible part of it.
pub fn validate_name_text(name: &str) -> AppResult<()> {
    let length = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&length) {
        return Err(AppError::validation(format!(
            "Name must be between {MIN_NAME_CHARS} and {MAX_NAME_CHARS} characters"
        )));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return Err(AppError::validation(format!(
            "Name may only contain letters, digits, and spaces (found {bad:?})"
        )));
    }

    Ok(())
}
