//! Library-level playback against fixture pages

use termynal::dom::Document;
use termynal::{Container, LineData, PartialOptions, PlaybackState, Termynal, VirtualClock};

use crate::helpers::load_fixture;

fn fixture_player(lines: Vec<LineData>) -> (Document, Termynal<termynal::dom::DomElement>) {
    let document = Document::parse(&load_fixture("demo.html"));
    let player = Termynal::new(&document, "#termynal", PartialOptions::default(), lines).unwrap();
    (document, player)
}

#[test]
fn fixture_page_plays_to_completion() {
    let (document, mut player) = fixture_player(Vec::new());
    player.init().unwrap();

    let mut clock = VirtualClock::new();
    player.start(&mut clock);

    assert!(matches!(player.state(), PlaybackState::Done));
    assert_eq!(
        player.container().line_texts(),
        vec!["$ pip install termynal", "#### 100%", "Successfully installed termynal"]
    );
    assert_eq!(player.container().attribute("data-termynal").as_deref(), Some(""));

    let other = document.element_by_id("other").unwrap();
    assert!(other.line_texts().is_empty());
    assert!(other.inner_text().contains("not played"));
}

#[test]
fn explicit_lines_follow_markup_lines() {
    let (_document, mut player) = fixture_player(vec![LineData::output("bye")]);
    player.init().unwrap();
    player.start(&mut VirtualClock::new());

    let texts = player.container().line_texts();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[3], "bye");
}

#[test]
fn nothing_changes_before_init() {
    let (document, mut player) = fixture_player(Vec::new());
    let before = document.to_html();

    player.start(&mut VirtualClock::new());

    assert_eq!(document.to_html(), before);
    assert!(player.container().dataset().contains_key("typeDelay"));
}
