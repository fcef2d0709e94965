//! Shared helpers for integration tests

use std::path::PathBuf;
use std::process::Command;

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Absolute path of a fixture, as a string for CLI arguments.
pub fn fixture_path(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Contents of a fixture file.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {name}: {e}"))
}

/// Run the termynal CLI with no user config and capture (stdout, stderr, exit code).
pub fn run_termynal(args: &[&str]) -> (String, String, i32) {
    run_termynal_with_config(args, &fixtures_dir().join("missing-config.toml"))
}

/// Run the termynal CLI reading its config file from `config`.
pub fn run_termynal_with_config(args: &[&str], config: &std::path::Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_termynal"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("TERMYNAL_CONFIG", config)
        .env_remove("TERMYNAL_LOG")
        .output()
        .expect("Failed to execute termynal");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
