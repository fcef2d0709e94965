//! Line-by-line terminal drawing with crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::theme::Theme;
use crate::config::Dataset;
use crate::container::{Container, ContainerSnapshot, LineId, Size};
use crate::error::Result;
use crate::line::fit_to_width;
use crate::markup::MarkupElement;

/// How lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Colours and in-place redraws
    Styled,
    /// Finished lines only, no escape sequences
    Plain,
}

impl RenderMode {
    /// Styled when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        if atty::is(atty::Stream::Stdout) && !no_color {
            Self::Styled
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TermLine {
    class: String,
    text: String,
    cursor: Option<String>,
}

/// A [`Container`] drawing into a writer.
///
/// Markup (dataset, flagged elements) comes from an optional
/// [`ContainerSnapshot`], usually taken from an HTML page. Write errors do
/// not interrupt playback; the first one is kept and returned by
/// [`TerminalSurface::finish`].
pub struct TerminalSurface<W: Write> {
    out: W,
    mode: RenderMode,
    theme: Theme,
    markup: ContainerSnapshot,
    /// Columns available; longer lines are cut so redraws stay on one row
    width: Option<usize>,
    lines: Vec<TermLine>,
    /// Lines already written out in plain mode
    flushed: usize,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, mode: RenderMode) -> Self {
        Self {
            out,
            mode,
            theme: Theme::default(),
            markup: ContainerSnapshot::default(),
            width: None,
            lines: Vec::new(),
            flushed: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_markup(mut self, markup: ContainerSnapshot) -> Self {
        self.markup = markup;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width.filter(|w| *w > 0);
        self
    }

    /// Use the width of the controlling terminal, if there is one.
    #[must_use]
    pub fn with_terminal_width(self) -> Self {
        let width = terminal_size::terminal_size().map(|(w, _)| usize::from(w.0));
        self.with_width(width)
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Text of every line so far.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    /// End the output and hand the writer back, or the first write error.
    pub fn finish(mut self) -> Result<W> {
        match self.mode {
            RenderMode::Styled => {
                if !self.lines.is_empty() {
                    let result = queue!(self.out, ResetColor, Print("\r\n"));
                    self.record(result);
                }
            }
            RenderMode::Plain => self.flush_completed(self.lines.len()),
        }
        let result = self.out.flush();
        self.record(result);

        match self.error.take() {
            Some(err) => Err(err.into()),
            None => Ok(self.out),
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if self.error.is_none() {
                tracing::warn!(error = %err, "Terminal write failed");
                self.error = Some(err);
            }
        }
    }

    /// Redraw the last line in place.
    fn redraw(&mut self, index: usize) {
        if self.mode != RenderMode::Styled || index + 1 != self.lines.len() {
            return;
        }
        let line = &self.lines[index];
        let color = self.theme.color_for_class(&line.class);
        let text = fit_to_width(&line.text, self.width.map(|w| w.saturating_sub(1)));
        let cursor = line.cursor.clone();

        let mut result = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(color),
            Print(text),
        );
        if let Some(cursor) = cursor.filter(|_| result.is_ok()) {
            result = queue!(self.out, SetForegroundColor(self.theme.cursor), Print(cursor));
        }
        if result.is_ok() {
            result = queue!(self.out, ResetColor);
        }
        if result.is_ok() {
            result = self.out.flush();
        }
        self.record(result);
    }

    /// Write lines `flushed..upto` in plain mode.
    fn flush_completed(&mut self, upto: usize) {
        while self.flushed < upto {
            let text = fit_to_width(&self.lines[self.flushed].text, self.width);
            let result = writeln!(self.out, "{text}");
            self.record(result);
            self.flushed += 1;
        }
    }
}

impl<W: Write> Container for TerminalSurface<W> {
    fn dataset(&self) -> Dataset {
        self.markup.dataset.clone()
    }

    fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement> {
        self.markup.flagged_elements(attribute)
    }

    fn computed_size(&self) -> Size {
        self.markup.size
    }

    fn pin_size(&mut self, width: Option<f64>, min_height: Option<f64>) {
        tracing::trace!(?width, ?min_height, "Ignoring size pin in terminal");
    }

    fn set_attribute(&mut self, _name: &str, _value: &str) {}

    fn clear(&mut self) {
        self.flush_completed(self.lines.len());
    }

    fn append_line(&mut self, class: &str) -> LineId {
        match self.mode {
            RenderMode::Styled => {
                if !self.lines.is_empty() {
                    let result = queue!(self.out, ResetColor, Print("\r\n"));
                    self.record(result);
                }
            }
            RenderMode::Plain => self.flush_completed(self.lines.len()),
        }
        self.lines.push(TermLine {
            class: class.to_string(),
            ..TermLine::default()
        });
        LineId(self.lines.len() - 1)
    }

    fn set_line_text(&mut self, line: LineId, text: &str) {
        if let Some(entry) = self.lines.get_mut(line.0) {
            entry.text = text.to_string();
            self.redraw(line.0);
        }
    }

    fn set_line_cursor(&mut self, line: LineId, cursor: Option<&str>) {
        if let Some(entry) = self.lines.get_mut(line.0) {
            entry.cursor = cursor.map(str::to_string);
            self.redraw(line.0);
        }
    }
}
