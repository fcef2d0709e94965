//! Recording playback as an asciicast.
//!
//! [`CastSurface`] is a [`Container`] that turns every line mutation into an
//! output event stamped with simulated time, so a recording of any length is
//! produced instantly. Each line also gets a marker named after its type.

use std::time::Duration;

use crate::asciicast::{AsciicastFile, Event, Header};
use crate::config::Dataset;
use crate::container::{Container, ContainerSnapshot, LineId, Size};
use crate::line::{fit_to_width, LineType};
use crate::markup::MarkupElement;
use crate::player::{Step, Termynal};

/// Carriage return plus "erase line", used to redraw the current line.
const REDRAW: &str = "\r\x1b[2K";

/// Cursor up one row plus "erase line", for multi-row redraws.
const CLEAR_ROW_ABOVE: &str = "\x1b[1A\x1b[2K";

#[derive(Debug, Clone, Default)]
struct CastLine {
    text: String,
    cursor: Option<String>,
}

/// Container recording an asciicast.
#[derive(Debug, Clone)]
pub struct CastSurface {
    cast: AsciicastFile,
    markup: ContainerSnapshot,
    lines: Vec<CastLine>,
    /// Simulated time since the start
    now: Duration,
    /// Time of the last event written
    last_event: Duration,
    /// Rows taken by the last draw of the current line
    drawn_rows: usize,
    markers: bool,
}

impl CastSurface {
    pub fn new(header: Header) -> Self {
        Self {
            cast: AsciicastFile::new(header),
            markup: ContainerSnapshot::default(),
            lines: Vec::new(),
            now: Duration::ZERO,
            last_event: Duration::ZERO,
            drawn_rows: 1,
            markers: true,
        }
    }

    #[must_use]
    pub fn with_markup(mut self, markup: ContainerSnapshot) -> Self {
        self.markup = markup;
        self
    }

    /// Whether to write a marker at the start of every line.
    #[must_use]
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Move simulated time forward.
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    pub fn elapsed(&self) -> Duration {
        self.now
    }

    /// Close the recording. Time spent after the last change is kept by a
    /// final line break.
    pub fn into_cast(mut self) -> AsciicastFile {
        if !self.lines.is_empty() {
            self.output("\r\n");
        }
        self.cast
    }

    fn interval(&mut self) -> Duration {
        let interval = self.now - self.last_event;
        self.last_event = self.now;
        interval
    }

    fn output(&mut self, data: impl Into<String>) {
        let interval = self.interval();
        self.cast.events.push(Event::output(interval, data));
    }

    /// Redraw the last line, one row per embedded line break, each cut to
    /// the recorded width less a column for the cursor.
    fn redraw(&mut self, index: usize) {
        if index + 1 != self.lines.len() {
            return;
        }
        let width = usize::from(self.cast.header.term.cols).saturating_sub(1);
        let line = &self.lines[index];
        let rows: Vec<&str> = line
            .text
            .split('\n')
            .map(|row| fit_to_width(row.trim_end_matches('\r'), Some(width)))
            .collect();

        let mut data = String::from(REDRAW);
        for _ in 1..self.drawn_rows {
            data.push_str(CLEAR_ROW_ABOVE);
        }
        data.push_str(&rows.join("\r\n"));
        data.push_str(line.cursor.as_deref().unwrap_or_default());

        self.drawn_rows = rows.len();
        self.output(data);
    }
}

impl Container for CastSurface {
    fn dataset(&self) -> Dataset {
        self.markup.dataset.clone()
    }

    fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement> {
        self.markup.flagged_elements(attribute)
    }

    fn computed_size(&self) -> Size {
        self.markup.size
    }

    fn pin_size(&mut self, _width: Option<f64>, _min_height: Option<f64>) {}

    fn set_attribute(&mut self, _name: &str, _value: &str) {}

    fn clear(&mut self) {}

    fn append_line(&mut self, _class: &str) -> LineId {
        if !self.lines.is_empty() {
            self.output("\r\n");
        }
        self.lines.push(CastLine::default());
        self.drawn_rows = 1;
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

    fn line_started(&mut self, index: usize, line_type: LineType) {
        if self.markers {
            let interval = self.interval();
            self.cast
                .events
                .push(Event::marker(interval, format!("{} {}", line_type, index + 1)));
        }
    }
}

/// Play `player` to the end in simulated time and return the recording.
///
/// The player must already be initialised.
pub fn record(mut player: Termynal<CastSurface>) -> AsciicastFile {
    while let Step::Wait(duration) = player.step() {
        player.container_mut().advance(duration);
    }
    tracing::debug!(
        elapsed = ?player.container().elapsed(),
        "Recording complete"
    );
    player.into_container().into_cast()
}
