//! CLI argument definitions using clap
//!
//! The grammar is positional-count driven rather than subcommand driven:
//! `tlp projects myapp` recalls, `tlp projects myapp /path` stores, a lone
//! `tlp myapp` searches across folders. The mode flags select the remaining
//! operations; which one applies is decided in
//! [`commands::Operation::from_cli`](crate::cli::commands::Operation).

use clap::Parser;

/// Directory bookmarks for your shell: store short aliases for paths, teleport back later
#[derive(Parser, Debug)]
#[command(name = "tlp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Overwrite the stored path when the alias already exists
    #[arg(long)]
    pub update: bool,

    /// List all aliases, or those whose folder contains the given substring
    #[arg(long)]
    pub list: bool,

    /// Delete an alias: --delete <folder> <alias>
    #[arg(long)]
    pub delete: bool,

    /// Rename an alias: --rename <folder> <old-alias> <new-alias>
    #[arg(long)]
    pub rename: bool,

    /// Rename a folder namespace: --rename-folder <old-folder> <new-folder>
    #[arg(long = "rename-folder")]
    pub rename_folder: bool,

    /// Print the command to inspect the raw store with the sqlite3 client
    #[arg(long)]
    pub sqlite: bool,

    /// Emit shell-evaluable output for the wrapping shell function
    #[arg(long)]
    pub sourced: bool,

    /// Enable debug logging (-d: info, -dd: debug, -ddd: trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Positional arguments; their count selects the operation
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}
