//! Integration tests for the render command

use crate::helpers::{fixture_path, run_termynal};

#[test]
fn script_renders_into_an_empty_container() {
    let (stdout, _stderr, exit_code) = run_termynal(&["render", &fixture_path("demo.toml")]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r#"<div id="termynal" data-termynal=""><pre class="termynal-input">ab</pre><pre class="termynal-output">ok</pre></div>"#);
}

#[test]
fn timing_reports_simulated_duration() {
    let (_stdout, stderr, exit_code) =
        run_termynal(&["render", &fixture_path("demo.toml"), "--timing"]);

    assert_eq!(exit_code, 0);
    // 100ms start delay + 2 typed characters at 10ms, no line delays
    assert_eq!(stderr.trim(), "120ms");
}

#[test]
fn page_render_replaces_markup_with_lines() {
    let (stdout, _stderr, exit_code) = run_termynal(&["render", &fixture_path("demo.html")]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("<div"));
    assert!(stdout.contains("data-termynal=\"\""));
    assert!(stdout.contains(r#"<pre class="termynal-input">$ pip install termynal</pre>"#));
    assert!(stdout.contains(r#"<pre class="termynal-progress">#### 100%</pre>"#));
    assert!(stdout.contains(r#"<pre class="termynal-output">Successfully installed termynal</pre>"#));
    assert!(!stdout.contains("data-ty="));
    assert!(!stdout.contains("not played"));
}

#[test]
fn document_flag_prints_whole_page() {
    let (stdout, _stderr, exit_code) =
        run_termynal(&["render", &fixture_path("demo.html"), "--document"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("<!DOCTYPE html><html>"));
    assert!(stdout.contains("<title>termynal demo</title><!-- rendered by termynal -->"));
    // The second container is left alone
    assert!(stdout.contains(r#"<span data-ty="input">not played</span>"#));
}

#[test]
fn class_name_flag_is_added_to_lines() {
    let (stdout, _stderr, exit_code) = run_termynal(&[
        "render",
        &fixture_path("demo.toml"),
        "--class-name",
        "fancy",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains(r#"<pre class="termynal-input fancy">ab</pre>"#));
}

#[test]
fn exact_progress_policy_stops_at_target() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("progress.json");
    std::fs::write(
        &script,
        r#"[{"type": "progress", "progressLength": 10, "progressPercent": 50, "progressChar": "="}]"#,
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run_termynal(&[
        "render",
        script.to_str().unwrap(),
        "--progress-policy",
        "exact",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains(">====== 50%</pre>"), "got: {stdout}");
}
