// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::Cli;
use crate::config::Config;
use crate::logging::LogLevel;
use crate::rebuild::range::PickRange;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_no_arguments() {
    let cli = Cli::try_parse_from(["rebuild-branch"]).expect("no arguments are required");
    assert_eq!(cli.rebuild.remote, None);
    assert_eq!(cli.rebuild.base_branch, None);
    assert_eq!(cli.rebuild.new_branch, None);
    assert_eq!(cli.rebuild.range, None);
    assert_eq!(cli.rebuild.repo, PathBuf::from("."));
    assert!(!cli.global.dry);
    assert!(cli.global.inis.is_empty());
}

#[test]
fn test_parse_positionals_in_order() {
    let cli = Cli::try_parse_from(["rebuild-branch", "upstream", "develop", "search-v2"])
        .expect("three positionals");
    assert_eq!(cli.rebuild.remote.as_deref(), Some("upstream"));
    assert_eq!(cli.rebuild.base_branch.as_deref(), Some("develop"));
    assert_eq!(cli.rebuild.new_branch.as_deref(), Some("search-v2"));
}

#[test]
fn test_parse_global_and_rebuild_options() {
    let cli = Cli::try_parse_from([
        "rebuild-branch",
        "-l",
        "4",
        "--dry",
        "-i",
        "a.toml",
        "--ini",
        "b.toml",
        "-C",
        "/tmp/repo",
        "--range",
        "abc1234..def5678",
    ])
    .expect("options should parse");
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.dry);
    assert_eq!(
        cli.global.inis,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(cli.rebuild.repo, PathBuf::from("/tmp/repo"));
    assert_eq!(
        cli.rebuild.range,
        Some(PickRange::new("abc1234", "def5678"))
    );
}

#[test]
fn test_parse_rejects_bad_range() {
    let err = Cli::try_parse_from(["rebuild-branch", "--range", "abc1234"])
        .expect_err("range without '..'");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_parse_rejects_out_of_range_log_level() {
    assert!(Cli::try_parse_from(["rebuild-branch", "-l", "7"]).is_err());
}

#[test]
fn test_parse_rejects_fourth_positional() {
    assert!(Cli::try_parse_from(["rebuild-branch", "a", "b", "c", "d"]).is_err());
}

fn config_for(args: &[&str]) -> Config {
    let mut argv = vec!["rebuild-branch", "--no-default-inis"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .expect("arguments should parse")
        .config_loader()
        .expect("overrides should apply")
        .build()
        .expect("config should build")
}

#[test]
fn test_no_arguments_yield_default_config() {
    assert_eq!(config_for(&[]), Config::default());
}

#[test]
fn test_arguments_override_config() {
    let config = config_for(&[
        "--dry",
        "-l",
        "3",
        "--range",
        "1111111..2222222",
        "upstream",
        "develop",
    ]);
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    // file level follows the console level unless given
    assert_eq!(config.global.file_log_level, LogLevel::INFO);
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.base_branch, "develop");
    assert_eq!(config.git.new_branch, "chem-search-rebuild");
    assert_eq!(config.git.pick_range, PickRange::new("1111111", "2222222"));
}

#[test]
fn test_file_log_level_independent_of_console() {
    let config = config_for(&["-l", "1", "--file-log-level", "4", "--log-file", "r.log"]);
    assert_eq!(config.global.output_log_level, LogLevel::ERROR);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("r.log")));
}

#[test]
fn test_ini_files_are_required() {
    let cli = Cli::try_parse_from(["rebuild-branch", "-i", "/nonexistent/rebuild.toml"])
        .expect("arguments should parse");
    let result = cli.config_loader().expect("loader").build();
    assert!(result.is_err(), "a missing --ini file must fail");
}

#[test]
fn test_cli_overrides_ini_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ini = dir.path().join("custom.toml");
    std::fs::write(&ini, "[git]\nremote = \"fork\"\nbase_branch = \"trunk\"\n").expect("write");

    let ini = ini.display().to_string();
    let config = config_for(&["-i", &ini, "mirror"]);
    assert_eq!(config.git.remote, "mirror");
    assert_eq!(config.git.base_branch, "trunk");
}
