//! Argument-shape → operation selection tests.
//!
//! The selection rule is a pure function of the mode flags and the
//! positional count, so these run without a database.

use clap::Parser;
use rstest::rstest;

use tlp::cli::args::Cli;
use tlp::cli::commands::Operation;
use tlp::cli::error::CliError;

fn parse(argv: &[&str]) -> Cli {
    Cli::try_parse_from(argv).expect("argv should parse")
}

fn op(argv: &[&str]) -> Operation {
    Operation::from_cli(&parse(argv)).expect("shape should select an operation")
}

#[test]
fn given_one_positional_when_selected_then_search() {
    assert_eq!(
        op(&["tlp", "myapp"]),
        Operation::Search {
            alias: "myapp".into()
        }
    );
}

#[test]
fn given_two_positionals_when_selected_then_recall() {
    assert_eq!(
        op(&["tlp", "code/projects", "myapp"]),
        Operation::Recall {
            folder: "code/projects".into(),
            alias: "myapp".into()
        }
    );
}

#[rstest]
#[case(&["tlp", "code", "myapp", "/home/user/myapp"], false)]
#[case(&["tlp", "--update", "code", "myapp", "/home/user/myapp"], true)]
fn given_three_positionals_when_selected_then_store(
    #[case] argv: &[&str],
    #[case] update: bool,
) {
    assert_eq!(
        op(argv),
        Operation::Store {
            folder: "code".into(),
            alias: "myapp".into(),
            path: "/home/user/myapp".into(),
            update,
        }
    );
}

#[test]
fn given_list_flag_when_selected_then_list_variants() {
    assert_eq!(op(&["tlp", "--list"]), Operation::ListAll);
    assert_eq!(
        op(&["tlp", "--list", "code"]),
        Operation::ListFolder {
            needle: "code".into()
        }
    );
    assert_eq!(op(&["tlp", "--list", "a", "b"]), Operation::Usage);
}

#[test]
fn given_delete_flag_when_selected_then_delete_or_usage() {
    assert_eq!(
        op(&["tlp", "--delete", "code", "myapp"]),
        Operation::Delete {
            folder: "code".into(),
            alias: "myapp".into()
        }
    );
    assert_eq!(op(&["tlp", "--delete", "code"]), Operation::Usage);
}

#[test]
fn given_rename_flag_when_selected_then_rename_or_usage() {
    assert_eq!(
        op(&["tlp", "--rename", "code", "old", "new"]),
        Operation::Rename {
            folder: "code".into(),
            old_alias: "old".into(),
            new_alias: "new".into()
        }
    );
    assert_eq!(op(&["tlp", "--rename", "code", "old"]), Operation::Usage);
}

#[test]
fn given_rename_folder_flag_when_selected_then_rename_folder_or_usage() {
    assert_eq!(
        op(&["tlp", "--rename-folder", "old", "new"]),
        Operation::RenameFolder {
            old_folder: "old".into(),
            new_folder: "new".into()
        }
    );
    assert_eq!(op(&["tlp", "--rename-folder", "old"]), Operation::Usage);
}

#[test]
fn given_sqlite_flag_when_selected_then_wins_over_everything() {
    assert_eq!(op(&["tlp", "--sqlite"]), Operation::OpenRawStore);
    // Precedence: --sqlite is checked before --list and positionals.
    assert_eq!(
        op(&["tlp", "--sqlite", "--list", "code"]),
        Operation::OpenRawStore
    );
}

#[test]
fn given_four_positionals_when_selected_then_usage() {
    assert_eq!(op(&["tlp", "a", "b", "c", "d"]), Operation::Usage);
}

#[test]
fn given_empty_invocation_when_selected_then_usage_error() {
    let result = Operation::from_cli(&parse(&["tlp"]));
    assert!(matches!(result, Err(CliError::Usage(_))));
}

#[test]
fn given_unknown_flag_when_parsed_then_fatal_parse_error() {
    assert!(Cli::try_parse_from(["tlp", "--bogus", "myapp"]).is_err());
}

#[test]
fn given_sourced_flag_when_parsed_then_threaded_through() {
    assert!(parse(&["tlp", "--sourced", "myapp"]).sourced);
    assert!(!parse(&["tlp", "myapp"]).sourced);
}
