//! Integration tests for argument handling, errors and the small commands

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{fixture_path, fixtures_dir, run_termynal, run_termynal_with_config};

fn termynal() -> Command {
    let mut cmd = Command::cargo_bin("termynal").expect("binary is built");
    cmd.env("NO_COLOR", "1")
        .env("TERMYNAL_CONFIG", fixtures_dir().join("missing-config.toml"));
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_every_command() {
    let (stdout, _stderr, exit_code) = run_termynal(&["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["play", "cast", "render", "lines", "config", "completions"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn play_help_shows_option_flags() {
    termynal()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type-delay"))
        .stdout(predicate::str::contains("--progress-policy"))
        .stdout(predicate::str::contains("--selector"))
        .stdout(predicate::str::contains("<FILE>"));
}

#[test]
fn version_flag_prints_version() {
    termynal()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn missing_file_argument_is_a_usage_error() {
    let (_stdout, stderr, exit_code) = run_termynal(&["render"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}

#[test]
fn nonexistent_file_exits_1_with_helpful_error() {
    let (_stdout, stderr, exit_code) = run_termynal(&["render", "nonexistent.html"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("nonexistent.html"));
}

#[test]
fn unknown_selector_reports_missing_container() {
    let (_stdout, stderr, exit_code) = run_termynal(&[
        "render",
        &fixture_path("demo.html"),
        "--selector",
        "#nowhere",
    ]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("container not found"));
    assert!(stderr.contains("#nowhere"));
}

#[test]
fn invalid_selector_is_reported() {
    let (_stdout, stderr, exit_code) =
        run_termynal(&["lines", &fixture_path("demo.html"), "--selector", "##"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid selector"));
}

#[test]
fn invalid_script_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    termynal()
        .args(["lines", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load script"));
}

#[test]
fn unknown_line_type_flag_is_a_usage_error() {
    let (_stdout, stderr, exit_code) = run_termynal(&[
        "lines",
        &fixture_path("demo.json"),
        "--default-type",
        "shell",
    ]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("unknown line type"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_path_follows_environment_override() {
    let config = fixtures_dir().join("config.toml");
    let (stdout, _stderr, exit_code) = run_termynal_with_config(&["config", "path"], &config);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn config_show_prints_options_table() {
    let config = fixtures_dir().join("config.toml");
    let (stdout, _stderr, exit_code) = run_termynal_with_config(&["config", "show"], &config);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[options]"));
    assert!(stdout.contains("typeDelay"));
    assert!(stdout.contains("cursor = \"_\""));
}

#[test]
fn config_show_without_file_says_so() {
    let (stdout, _stderr, exit_code) = run_termynal(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No options set"));
}

#[test]
fn broken_config_file_is_skipped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[options\n").unwrap();

    let (stdout, stderr, exit_code) = run_termynal_with_config(
        &["lines", &fixture_path("demo.json"), "--resolved"],
        &config,
    );

    assert_eq!(exit_code, 0);
    assert!(stderr.contains("Ignoring config file"));
    assert!(stdout.contains("\"typeDelay\": 5.0"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn bash_completions_mention_subcommands() {
    termynal()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("termynal"))
        .stdout(predicate::str::contains("render"));
}
