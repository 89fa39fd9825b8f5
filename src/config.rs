//! Store location resolution.
//!
//! The database lives beneath the per-user config directory
//! (`~/.config/tlp/tlp.sqlite3` on Linux), created on first use. `TLP_DB`
//! overrides the full path for scripting and tests.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

pub const DB_ENV_VAR: &str = "TLP_DB";
const DB_FILE: &str = "tlp.sqlite3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory for the alias store")]
    NoHomeDir,

    #[error("Cannot create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
}

impl Settings {
    /// Resolve the store location: `TLP_DB` if set, otherwise the per-user
    /// config directory.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(db) = env::var_os(DB_ENV_VAR) {
            return Ok(Self {
                db_path: PathBuf::from(db),
            });
        }
        let dirs = ProjectDirs::from("", "", "tlp").ok_or(ConfigError::NoHomeDir)?;
        Ok(Self {
            db_path: dirs.config_dir().join(DB_FILE),
        })
    }

    /// Create the directory the database lives in, idempotently.
    pub fn ensure_store_dir(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the env var is process-global and cargo runs tests in
    // parallel threads.
    #[test]
    fn given_env_override_when_load_then_uses_it_else_config_dir() {
        env::set_var(DB_ENV_VAR, "/tmp/tlp-test/override.sqlite3");
        let settings = Settings::load().unwrap();
        assert_eq!(
            settings.db_path,
            PathBuf::from("/tmp/tlp-test/override.sqlite3")
        );

        env::remove_var(DB_ENV_VAR);
        let settings = Settings::load().unwrap();
        assert!(settings.db_path.ends_with("tlp/tlp.sqlite3"));
    }
}
