//! CLI-level errors (wraps config and store errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Top-level error type; everything that aborts an invocation ends up here
/// and gets rendered once in `main`.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(ConfigError::NoHomeDir) => crate::exitcode::CONFIG,
            CliError::Config(ConfigError::CreateDir { .. }) => crate::exitcode::CANTCREAT,
            CliError::Store(StoreError::Sqlite(_)) => crate::exitcode::IOERR,
            CliError::Store(_) => crate::exitcode::SOFTWARE,
        }
    }
}
