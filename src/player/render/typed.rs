//! Typed input renderer.
//!
//! Reveals an input line one character per `type_delay`, after its prompt.
//! Characters are Unicode scalar values; grapheme clusters are not kept
//! together.

use std::time::Duration;

use crate::container::{Container, LineId};
use crate::line::ResolvedLine;

/// Text shown before any character is typed.
fn initial_text(prompt: Option<&str>) -> String {
    match prompt {
        Some(prompt) => format!("{prompt} "),
        None => String::new(),
    }
}

/// An in-flight typed line.
#[derive(Debug, Clone)]
pub struct TypedLine {
    line: LineId,
    text: String,
    chars: Vec<char>,
    next: usize,
    delay: Duration,
    /// A suspension has been handed out and `chars[next]` is due
    pending: bool,
}

impl TypedLine {
    /// Append the line showing only its prompt, with the cursor on.
    pub fn begin<C: Container + ?Sized>(container: &mut C, line: &ResolvedLine) -> Self {
        let id = container.append_line(&line.class);
        let text = initial_text(line.prompt.as_deref());
        container.set_line_text(id, &text);
        container.set_line_cursor(id, Some(&line.cursor));

        Self {
            line: id,
            text,
            chars: line.value.chars().collect(),
            next: 0,
            delay: line.type_delay,
            pending: false,
        }
    }

    /// Type the character that was due, then hand out the next suspension.
    ///
    /// An empty value yields no suspension at all. Returns `None` once the
    /// whole value is shown, with the cursor removed.
    pub fn resume<C: Container + ?Sized>(&mut self, container: &mut C) -> Option<Duration> {
        if self.pending {
            self.pending = false;
            if let Some(c) = self.chars.get(self.next) {
                self.text.push(*c);
                self.next += 1;
                container.set_line_text(self.line, &self.text);
            }
        }

        if self.next < self.chars.len() {
            self.pending = true;
            return Some(self.delay);
        }

        container.set_line_cursor(self.line, None);
        None
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    /// Text shown so far, prompt included.
    pub fn text(&self) -> &str {
        &self.text
    }
}
