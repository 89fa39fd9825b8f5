//! SQLite-backed alias store.
//!
//! One table, one row per alias, unique on `(folder_path, alias)`. The
//! connection is opened once per invocation and released on drop, on every
//! exit path. `upsert` is a read-then-branch-then-write sequence and is not
//! atomic against another process racing the same key; a single-user local
//! tool gets by on SQLite's own locking.

pub mod error;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use tracing::{debug, instrument, warn};

pub use error::{StoreError, StoreResult};

/// One alias row, as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub folder_path: String,
    pub alias: String,
    pub absolute_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub invocation_count: i64,
}

/// Outcome of [`AliasStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    Updated,
}

/// Outcome of [`AliasStore::recall`].
///
/// The invocation-count bump is telemetry: if it fails, the failure is
/// carried here for reporting but the path is still resolved.
#[derive(Debug)]
pub struct Recalled {
    pub absolute_path: String,
    pub count_error: Option<String>,
}

pub struct AliasStore {
    conn: Connection,
}

impl AliasStore {
    /// Open (creating if absent) the store at `path` and ensure the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> StoreResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS aliases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                folder_path TEXT NOT NULL,
                alias TEXT NOT NULL,
                absolute_path TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                invocation_count INTEGER NOT NULL DEFAULT 0,
                UNIQUE (folder_path, alias)
            )",
            [],
        )?;
        Ok(())
    }

    /// Create `(folder, alias) -> path`, or overwrite the stored path when
    /// `allow_update` is set. An update re-stamps `updated_at` and keeps
    /// the invocation count; a create starts the count at zero.
    #[instrument(skip(self))]
    pub fn upsert(
        &self,
        folder: &str,
        alias: &str,
        path: &str,
        allow_update: bool,
    ) -> StoreResult<Upserted> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT absolute_path FROM aliases WHERE folder_path = ?1 AND alias = ?2",
                params![folder, alias],
                |row| row.get(0),
            )
            .optional()?;

        let now = Utc::now();
        match existing {
            Some(_) if !allow_update => Err(StoreError::AliasExists {
                folder: folder.to_string(),
                alias: alias.to_string(),
            }),
            Some(_) => {
                self.conn.execute(
                    "UPDATE aliases SET absolute_path = ?1, updated_at = ?2
                     WHERE folder_path = ?3 AND alias = ?4",
                    params![path, now, folder, alias],
                )?;
                debug!(folder, alias, "alias updated");
                Ok(Upserted::Updated)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO aliases
                        (folder_path, alias, absolute_path, created_at, updated_at, invocation_count)
                     VALUES (?1, ?2, ?3, ?4, ?5, 0)",
                    params![folder, alias, path, now, now],
                )?;
                debug!(folder, alias, "alias created");
                Ok(Upserted::Created)
            }
        }
    }

    /// Resolve `(folder, alias)` to its stored path, bumping the invocation
    /// count as a side effect.
    #[instrument(skip(self))]
    pub fn recall(&self, folder: &str, alias: &str) -> StoreResult<Recalled> {
        let absolute_path: Option<String> = self
            .conn
            .query_row(
                "SELECT absolute_path FROM aliases WHERE folder_path = ?1 AND alias = ?2",
                params![folder, alias],
                |row| row.get(0),
            )
            .optional()?;

        let Some(absolute_path) = absolute_path else {
            return Err(StoreError::AliasNotFound {
                folder: folder.to_string(),
                alias: alias.to_string(),
            });
        };

        let count_error = match self.conn.execute(
            "UPDATE aliases SET invocation_count = invocation_count + 1
             WHERE folder_path = ?1 AND alias = ?2",
            params![folder, alias],
        ) {
            Ok(_) => None,
            Err(e) => {
                warn!(folder, alias, error = %e, "invocation count update failed");
                Some(e.to_string())
            }
        };

        Ok(Recalled {
            absolute_path,
            count_error,
        })
    }

    /// Remove `(folder, alias)`. Zero rows removed is a recoverable
    /// not-found, never a crash.
    #[instrument(skip(self))]
    pub fn delete(&self, folder: &str, alias: &str) -> StoreResult<()> {
        let removed = self.conn.execute(
            "DELETE FROM aliases WHERE folder_path = ?1 AND alias = ?2",
            params![folder, alias],
        )?;
        if removed == 0 {
            return Err(StoreError::AliasNotFound {
                folder: folder.to_string(),
                alias: alias.to_string(),
            });
        }
        Ok(())
    }

    /// Rename the alias label within a folder. A collision with an existing
    /// `(folder, new_alias)` row surfaces as [`StoreError::AliasExists`],
    /// mapped from the UNIQUE constraint.
    #[instrument(skip(self))]
    pub fn rename_alias(&self, folder: &str, old_alias: &str, new_alias: &str) -> StoreResult<()> {
        let now = Utc::now();
        let renamed = self
            .conn
            .execute(
                "UPDATE aliases SET alias = ?1, updated_at = ?2
                 WHERE folder_path = ?3 AND alias = ?4",
                params![new_alias, now, folder, old_alias],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::AliasExists {
                        folder: folder.to_string(),
                        alias: new_alias.to_string(),
                    }
                } else {
                    StoreError::Sqlite(e)
                }
            })?;
        if renamed == 0 {
            return Err(StoreError::AliasNotFound {
                folder: folder.to_string(),
                alias: old_alias.to_string(),
            });
        }
        Ok(())
    }

    /// Move every alias under `old_folder` to `new_folder`, re-stamping each
    /// row. Returns the number of rows moved.
    #[instrument(skip(self))]
    pub fn rename_folder(&self, old_folder: &str, new_folder: &str) -> StoreResult<usize> {
        let now = Utc::now();
        let moved = self
            .conn
            .execute(
                "UPDATE aliases SET folder_path = ?1, updated_at = ?2
                 WHERE folder_path = ?3",
                params![new_folder, now, old_folder],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::FolderCollision {
                        old: old_folder.to_string(),
                        new: new_folder.to_string(),
                    }
                } else {
                    StoreError::Sqlite(e)
                }
            })?;
        if moved == 0 {
            return Err(StoreError::FolderNotFound(old_folder.to_string()));
        }
        Ok(moved)
    }

    /// All records, ordered by `(folder_path, alias)` ascending.
    pub fn list_all(&self) -> StoreResult<Vec<AliasRecord>> {
        self.query_records(
            "SELECT folder_path, alias, absolute_path, created_at, updated_at, invocation_count
             FROM aliases ORDER BY folder_path, alias",
            params![],
        )
    }

    /// Records whose folder path contains `needle` as a literal,
    /// case-sensitive substring. `instr` rather than LIKE: `%` and `_` in
    /// the needle must not act as wildcards, and LIKE is case-insensitive
    /// for ASCII.
    pub fn list_by_folder(&self, needle: &str) -> StoreResult<Vec<AliasRecord>> {
        self.query_records(
            "SELECT folder_path, alias, absolute_path, created_at, updated_at, invocation_count
             FROM aliases WHERE instr(folder_path, ?1) > 0 ORDER BY folder_path, alias",
            params![needle],
        )
    }

    /// Records with exactly this alias, across all folders. One match means
    /// the caller can resolve unambiguously; more than one means the caller
    /// must be asked to qualify by folder.
    pub fn search_alias(&self, alias: &str) -> StoreResult<Vec<AliasRecord>> {
        self.query_records(
            "SELECT folder_path, alias, absolute_path, created_at, updated_at, invocation_count
             FROM aliases WHERE alias = ?1 ORDER BY folder_path, alias",
            params![alias],
        )
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<AliasRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn row_to_record(row: &Row) -> rusqlite::Result<AliasRecord> {
    Ok(AliasRecord {
        folder_path: row.get(0)?,
        alias: row.get(1)?,
        absolute_path: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        invocation_count: row.get(5)?,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == ErrorCode::ConstraintViolation
    )
}
