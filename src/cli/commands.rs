//! Operation selection and execution.
//!
//! One invocation maps to exactly one operation. Selection is a pure
//! function of the mode flags and the positional count, checked in the same
//! precedence order the usage text lists them; that makes the shape table
//! unit-testable without touching a database.

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::render::Renderer;
use crate::store::{AliasRecord, AliasStore, StoreError, StoreResult, Upserted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Store {
        folder: String,
        alias: String,
        path: String,
        update: bool,
    },
    Recall {
        folder: String,
        alias: String,
    },
    Search {
        alias: String,
    },
    ListAll,
    ListFolder {
        needle: String,
    },
    Delete {
        folder: String,
        alias: String,
    },
    Rename {
        folder: String,
        old_alias: String,
        new_alias: String,
    },
    RenameFolder {
        old_folder: String,
        new_folder: String,
    },
    OpenRawStore,
    Usage,
}

impl Operation {
    /// Select the operation from flags and positional count. A recognized
    /// flag with the wrong number of positionals degrades to `Usage`
    /// (informational); a completely empty invocation is a usage error.
    pub fn from_cli(cli: &Cli) -> CliResult<Operation> {
        let args = &cli.args;

        if cli.sqlite {
            return Ok(Operation::OpenRawStore);
        }
        if cli.list {
            return Ok(match args.as_slice() {
                [] => Operation::ListAll,
                [needle] => Operation::ListFolder {
                    needle: needle.clone(),
                },
                _ => Operation::Usage,
            });
        }
        if cli.delete {
            return Ok(match args.as_slice() {
                [folder, alias] => Operation::Delete {
                    folder: folder.clone(),
                    alias: alias.clone(),
                },
                _ => Operation::Usage,
            });
        }
        if cli.rename {
            return Ok(match args.as_slice() {
                [folder, old_alias, new_alias] => Operation::Rename {
                    folder: folder.clone(),
                    old_alias: old_alias.clone(),
                    new_alias: new_alias.clone(),
                },
                _ => Operation::Usage,
            });
        }
        if cli.rename_folder {
            return Ok(match args.as_slice() {
                [old_folder, new_folder] => Operation::RenameFolder {
                    old_folder: old_folder.clone(),
                    new_folder: new_folder.clone(),
                },
                _ => Operation::Usage,
            });
        }

        match args.as_slice() {
            [] => Err(CliError::Usage(
                "Invalid usage. Please check the instructions.".to_string(),
            )),
            [alias] => Ok(Operation::Search {
                alias: alias.clone(),
            }),
            [folder, alias] => Ok(Operation::Recall {
                folder: folder.clone(),
                alias: alias.clone(),
            }),
            [folder, alias, path] => Ok(Operation::Store {
                folder: folder.clone(),
                alias: alias.clone(),
                path: path.clone(),
                update: cli.update,
            }),
            _ => Ok(Operation::Usage),
        }
    }
}

pub fn execute_command(cli: &Cli, renderer: &Renderer) -> CliResult<()> {
    let op = Operation::from_cli(cli)?;
    debug!(?op, "dispatching");

    // Usage and the raw-store command never open the database.
    match op {
        Operation::Usage => {
            print_usage(renderer);
            Ok(())
        }
        Operation::OpenRawStore => open_raw_store(renderer),
        op => {
            let settings = Settings::load()?;
            settings.ensure_store_dir()?;
            let store = AliasStore::open(&settings.db_path)?;
            match op {
                Operation::Store {
                    folder,
                    alias,
                    path,
                    update,
                } => store_alias(&store, renderer, &folder, &alias, &path, update),
                Operation::Recall { folder, alias } => recall(&store, renderer, &folder, &alias),
                Operation::Search { alias } => search(&store, renderer, &alias),
                Operation::ListAll => list_all(&store, renderer),
                Operation::ListFolder { needle } => list_folder(&store, renderer, &needle),
                Operation::Delete { folder, alias } => delete(&store, renderer, &folder, &alias),
                Operation::Rename {
                    folder,
                    old_alias,
                    new_alias,
                } => rename(&store, renderer, &folder, &old_alias, &new_alias),
                Operation::RenameFolder {
                    old_folder,
                    new_folder,
                } => rename_folder(&store, renderer, &old_folder, &new_folder),
                Operation::Usage | Operation::OpenRawStore => unreachable!(),
            }
        }
    }
}

/// Report a recoverable store outcome as a diagnostic and carry on;
/// anything else aborts the invocation.
fn report_recoverable<T>(result: StoreResult<T>, renderer: &Renderer) -> CliResult<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_recoverable() => {
            renderer.diag(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(store, renderer))]
fn store_alias(
    store: &AliasStore,
    renderer: &Renderer,
    folder: &str,
    alias: &str,
    path: &str,
    update: bool,
) -> CliResult<()> {
    match store.upsert(folder, alias, path, update) {
        Ok(Upserted::Created) => renderer.info(&format!("Alias '{}' created.", alias)),
        Ok(Upserted::Updated) => renderer.info(&format!("Alias '{}' updated.", alias)),
        Err(e @ StoreError::AliasExists { .. }) => {
            renderer.diag(&format!("{}. Use --update to modify it.", e));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn recall(store: &AliasStore, renderer: &Renderer, folder: &str, alias: &str) -> CliResult<()> {
    let Some(recalled) = report_recoverable(store.recall(folder, alias), renderer)? else {
        return Ok(());
    };
    if let Some(count_error) = &recalled.count_error {
        renderer.diag(&format!("Error updating invocation count: {}", count_error));
    }
    // The parent shell changes directory; the path goes out unescaped.
    renderer.command(&format!("cd {}", recalled.absolute_path));
    Ok(())
}

#[instrument(skip(store, renderer))]
fn search(store: &AliasStore, renderer: &Renderer, alias: &str) -> CliResult<()> {
    let matches = store.search_alias(alias)?;
    match matches.as_slice() {
        [] => renderer.diag(&format!("Alias '{}' not found.", alias)),
        [only] => renderer.command(&format!("cd {}", only.absolute_path)),
        many => {
            renderer.info(&format!(
                "There are {} aliases under different folders. Please specify the folder too:",
                many.len()
            ));
            for record in many {
                renderer.info(&record_line(record));
            }
        }
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn list_all(store: &AliasStore, renderer: &Renderer) -> CliResult<()> {
    let records = store.list_all()?;
    if records.is_empty() {
        renderer.info("No aliases found.");
        return Ok(());
    }
    renderer.info(&format!("{} aliases found:", records.len()));
    for record in &records {
        renderer.info(&record_line(record));
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn list_folder(store: &AliasStore, renderer: &Renderer, needle: &str) -> CliResult<()> {
    let records = store.list_by_folder(needle)?;
    if records.is_empty() {
        renderer.info(&format!(
            "No aliases found under the folder path '{}'.",
            needle
        ));
        return Ok(());
    }
    renderer.info(&format!(
        "{} aliases found under the folder path '{}':",
        records.len(),
        needle
    ));
    for record in &records {
        renderer.info(&record_line(record));
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn delete(store: &AliasStore, renderer: &Renderer, folder: &str, alias: &str) -> CliResult<()> {
    if report_recoverable(store.delete(folder, alias), renderer)?.is_some() {
        renderer.info(&format!(
            "Alias '{}' under folder '{}' deleted.",
            alias, folder
        ));
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn rename(
    store: &AliasStore,
    renderer: &Renderer,
    folder: &str,
    old_alias: &str,
    new_alias: &str,
) -> CliResult<()> {
    if report_recoverable(store.rename_alias(folder, old_alias, new_alias), renderer)?.is_some() {
        renderer.info(&format!(
            "Alias '{}' under folder '{}' renamed to '{}'.",
            old_alias, folder, new_alias
        ));
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn rename_folder(
    store: &AliasStore,
    renderer: &Renderer,
    old_folder: &str,
    new_folder: &str,
) -> CliResult<()> {
    if let Some(moved) = report_recoverable(store.rename_folder(old_folder, new_folder), renderer)?
    {
        renderer.info(&format!(
            "Folder path '{}' renamed to '{}' for {} aliases.",
            old_folder, new_folder, moved
        ));
    }
    Ok(())
}

/// `--sqlite`: hand the raw store to the sqlite3 client. Sourced mode emits
/// the invocation for the parent shell to execute; interactive mode just
/// says where the store lives.
fn open_raw_store(renderer: &Renderer) -> CliResult<()> {
    let settings = Settings::load()?;
    let db = settings.db_path.display();
    if renderer.is_sourced() {
        renderer.command(&format!("sqlite3 {}", db));
    } else {
        renderer.info(&format!(
            "Use the \"sqlite3\" command to manually edit the alias store at '{}'",
            db
        ));
    }
    Ok(())
}

fn record_line(record: &AliasRecord) -> String {
    format!(
        "{} {} {}",
        record.alias, record.folder_path, record.absolute_path
    )
}

pub fn print_usage(renderer: &Renderer) {
    renderer.info("Usage for storing: tlp <folder_path> <alias> <absolute_path> [--update] [--sourced]");
    renderer.info("Usage for recalling: tlp <folder_path> <alias> [--sourced]");
    renderer.info("Usage for searching: tlp <alias> [--sourced]");
    renderer.info("Usage for listing all aliases: tlp --list [<partial_folder>] [--sourced]");
    renderer.info("Usage for deleting: tlp --delete <folder_path> <alias> [--sourced]");
    renderer.info("Usage for renaming an alias: tlp --rename <folder_path> <alias> <new_alias_name> [--sourced]");
    renderer.info("Usage for renaming a folder: tlp --rename-folder <old_folder_path> <new_folder_path> [--sourced]");
    renderer.info("Usage for opening the raw store: tlp --sqlite");
}
