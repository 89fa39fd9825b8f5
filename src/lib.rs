//! tlp: directory bookmarks for your shell.
//!
//! An alias is a short name for an absolute path, scoped to a "folder"
//! namespace (usually the directory the alias was created from, but the
//! store does not care). The binary is one-shot: a wrapping shell function
//! evaluates its stdout in `--sourced` mode, so recalling an alias can
//! actually `cd` the parent shell.

pub mod cli;
pub mod config;
pub mod exitcode;
pub mod render;
pub mod store;
pub mod util;
