//! Integration tests for asciicast recording

use termynal::asciicast::{AsciicastFile, EventType};

use crate::helpers::{fixture_path, run_termynal};

fn record(extra: &[&str]) -> (AsciicastFile, String) {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("demo.cast");
    let output_arg = output.to_string_lossy().into_owned();

    let mut args = vec!["cast", "-o", output_arg.as_str()];
    let script = fixture_path("demo.json");
    args.push(&script);
    args.extend_from_slice(extra);

    let (stdout, stderr, exit_code) = run_termynal(&args);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let content = std::fs::read_to_string(&output).expect("cast file written");
    (AsciicastFile::parse_str(&content).unwrap(), stdout)
}

#[test]
fn cast_writes_v3_file_with_markers() {
    let (cast, stdout) = record(&["--title", "Demo"]);

    assert_eq!(cast.header.version, 3);
    assert_eq!(cast.header.term.cols, 80);
    assert_eq!(cast.header.term.rows, 24);
    assert_eq!(cast.header.title.as_deref(), Some("Demo"));

    let markers: Vec<&str> = cast.markers().map(|event| event.data.as_str()).collect();
    assert_eq!(markers, vec!["input 1", "progress 2", "output 3"]);

    assert!(stdout.contains("Recorded 3 line(s)"));
}

#[test]
fn cast_output_replays_the_session() {
    let (cast, _stdout) = record(&[]);

    let text = cast.output_text();
    assert!(text.contains("$ ls"));
    assert!(text.contains("#### 100%"));
    assert!(text.contains("done"));
    assert!(cast.duration() > 0.0);
    assert!(cast
        .events
        .iter()
        .all(|event| event.interval >= 0.0));
}

#[test]
fn no_markers_flag_drops_markers() {
    let (cast, _stdout) = record(&["--no-markers", "--cols", "120"]);

    assert_eq!(cast.header.term.cols, 120);
    assert!(cast
        .events
        .iter()
        .all(|event| event.event_type == EventType::Output));
}
