//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore` writes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `TrainerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainerError {
    #[error(transparent)]
    Progress(#[from] ProgressStoreError),
    #[error(transparent)]
    Settings(#[from] qa_core::settings::SettingsError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
