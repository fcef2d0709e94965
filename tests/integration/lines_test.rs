//! Integration tests for the lines command

use serde_json::Value;

use crate::helpers::{fixture_path, fixtures_dir, run_termynal, run_termynal_with_config};

fn lines_json(args: &[&str]) -> Vec<Value> {
    let (stdout, stderr, exit_code) = run_termynal(args);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    serde_json::from_str(&stdout).expect("lines prints a JSON array")
}

#[test]
fn script_lines_are_printed_as_written() {
    let (stdout, _stderr, exit_code) = run_termynal(&["lines", &fixture_path("demo.json")]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r###"
    [
      {
        "type": "input",
        "value": "ls",
        "prompt": "$"
      },
      {
        "type": "progress",
        "progressLength": 4.0,
        "progressChar": "#"
      },
      {
        "value": "done"
      }
    ]
    "###);
}

#[test]
fn markup_lines_come_from_the_selected_container_only() {
    let lines = lines_json(&["lines", &fixture_path("demo.html")]);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["type"], "input");
    assert_eq!(lines[0]["value"], "pip install termynal");
    assert_eq!(lines[0]["prompt"], "$");
    assert_eq!(lines[1]["type"], "progress");
    assert_eq!(lines[1]["progressLength"], 4.0);
    assert_eq!(lines[1]["progressChar"], "#");
    assert_eq!(lines[2]["type"], "output");
}

#[test]
fn other_selector_picks_other_container() {
    let lines = lines_json(&["lines", &fixture_path("demo.html"), "--selector", "#other"]);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["value"], "not played");
}

#[test]
fn markup_attributes_override_flags() {
    // The container carries data-type-delay="5"
    let lines = lines_json(&[
        "lines",
        &fixture_path("demo.html"),
        "--type-delay",
        "99",
    ]);
    assert_eq!(lines[0]["typeDelay"], 5.0);
}

#[test]
fn resolved_fills_every_field() {
    let lines = lines_json(&["lines", &fixture_path("demo.json"), "--resolved"]);

    assert_eq!(lines[2]["type"], "output");
    assert_eq!(lines[2]["typeDelay"], 5.0);
    assert_eq!(lines[2]["delay"], 0.0);
    assert_eq!(lines[2]["progressLength"], 40.0);
    assert_eq!(lines[2]["cursor"], "▋");
    assert!(lines[2].get("prompt").is_none());
}

#[test]
fn default_type_flag_applies_to_untyped_lines() {
    let lines = lines_json(&[
        "lines",
        &fixture_path("demo.json"),
        "--resolved",
        "--default-type",
        "input",
    ]);
    assert_eq!(lines[2]["type"], "input");
}

#[test]
fn option_layers_config_then_script_then_flags() {
    let config = fixtures_dir().join("config.toml");
    let script = fixture_path("demo.json");

    // Script sets typeDelay; config only supplies the cursor
    let (stdout, _stderr, exit_code) =
        run_termynal_with_config(&["lines", &script, "--resolved"], &config);
    assert_eq!(exit_code, 0);
    let lines: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(lines[0]["typeDelay"], 5.0);
    assert_eq!(lines[0]["cursor"], "_");

    let (stdout, _stderr, _) = run_termynal_with_config(
        &["lines", &script, "--resolved", "--cursor", "|"],
        &config,
    );
    let lines: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(lines[0]["cursor"], "|");
}

#[test]
fn toml_scripts_are_accepted() {
    let lines = lines_json(&["lines", &fixture_path("demo.toml")]);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["value"], "ab");
    assert_eq!(lines[1]["type"], "output");
}
