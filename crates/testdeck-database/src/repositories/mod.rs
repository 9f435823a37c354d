//! Repository implementations for the TestDeck tree and version tables.

use sqlx::{Postgres, Transaction};

use testdeck_core::error::{AppError, ErrorKind};
use testdeck_core::result::AppResult;

pub mod case;
pub mod folder;

pub use case::CaseRepository;
pub use folder::FolderRepository;

/// Advisory lock key that serializes structural tree mutations
/// (moves, reorders, duplicates, deletes) across all connections.
pub(crate) const TREE_LOCK_KEY: i64 = 0x7E57_CA5E;

/// Take the transaction-scoped tree mutation lock.
///
/// The lock is released automatically when the transaction commits or
/// rolls back.
pub(crate) async fn lock_tree(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(TREE_LOCK_KEY)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to acquire tree lock", e))?;
    Ok(())
}

/// Wrap a sqlx error that is not handled by a more specific arm.
///
/// Connectivity failures become [`ErrorKind::Transport`] so callers can
/// tell "the call never completed" apart from "the database said no";
/// transported operations are not retried automatically.
pub(crate) fn db_error(context: &'static str, e: sqlx::Error) -> AppError {
    let kind = match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::Transport
        }
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, context, e)
}
