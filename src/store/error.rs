//! Store-level errors (wraps rusqlite errors)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Alias '{alias}' under folder '{folder}' already exists")]
    AliasExists { folder: String, alias: String },

    #[error("Alias '{alias}' under folder '{folder}' does not exist")]
    AliasNotFound { folder: String, alias: String },

    #[error("No aliases found under folder path '{0}'")]
    FolderNotFound(String),

    #[error("Renaming folder '{old}' collides with existing aliases under '{new}'")]
    FolderCollision { old: String, new: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Domain outcomes the caller reports and moves on from, as opposed to
    /// storage-infrastructure failures that abort the invocation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StoreError::Sqlite(_))
    }
}
