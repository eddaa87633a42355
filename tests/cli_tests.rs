//! CLI interface tests
//!
//! Tests basic CLI functionality like --help, --version, init and completions

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::get_bin;

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IPA package size comparison"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_without_subcommand_prints_overview() {
    get_bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: ipa-diff <COMMAND>"));
}

#[test]
fn test_cli_unknown_subcommand_fails() {
    get_bin().arg("explode").assert().failure();
}

#[test]
fn test_compare_help_lists_flags() {
    get_bin()
        .args(["compare", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--no-write"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn test_completions_bash_outputs_script() {
    get_bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ipa-diff"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    get_bin().args(["completions", "tcsh"]).assert().failure();
}

#[test]
fn test_init_creates_config_file() {
    let temp_dir = TempDir::new().unwrap();

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .ipa-diff.toml"));

    let content = fs::read_to_string(temp_dir.path().join(".ipa-diff.toml")).unwrap();
    assert!(content.contains("significance-threshold-bytes = 1024"));
    assert!(content.contains("package-extension = \"ipa\""));
}

#[test]
fn test_init_keeps_existing_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join(".ipa-diff.toml");
    fs::write(&config, "[report]\nmax-files-per-category = 3\n").unwrap();

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert!(fs::read_to_string(&config).unwrap().contains("= 3"));
}

#[test]
fn test_init_force_overwrites_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join(".ipa-diff.toml");
    fs::write(&config, "[report]\nmax-files-per-category = 3\n").unwrap();

    get_bin()
        .args(["init", "--force"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    assert!(fs::read_to_string(&config)
        .unwrap()
        .contains("max-files-per-category = 20"));
}
