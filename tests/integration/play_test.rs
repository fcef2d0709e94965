//! Integration tests for terminal playback

use crate::helpers::{fixture_path, run_termynal};

#[test]
fn plain_playback_prints_finished_lines() {
    let (stdout, stderr, exit_code) =
        run_termynal(&["play", &fixture_path("demo.json"), "--plain"]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    insta::assert_snapshot!(stdout.trim_end(), @r"
    $ ls
    #### 100%
    done
    ");
}

#[test]
fn playback_reads_html_pages() {
    let (stdout, _stderr, exit_code) = run_termynal(&[
        "play",
        &fixture_path("demo.html"),
        "--plain",
        "--speed",
        "10",
    ]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["$ pip install termynal", "#### 100%", "Successfully installed termynal"]
    );
}

#[test]
fn unknown_theme_is_rejected() {
    let (stdout, stderr, exit_code) = run_termynal(&[
        "play",
        &fixture_path("demo.json"),
        "--theme",
        "neon",
    ]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown theme 'neon'"));
}
