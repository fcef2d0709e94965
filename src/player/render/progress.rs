//! Progress bar renderer.
//!
//! Fills a bar of `progress_length` glyphs one step per `type_delay`,
//! showing the rounded percentage after the bar, until the stop rule of the
//! configured [`ProgressPolicy`] fires or the bar is full.

use std::time::Duration;

use crate::config::ProgressPolicy;
use crate::container::{Container, LineId};
use crate::line::ResolvedLine;

/// Rounded percentage shown at `step` of a bar `length` glyphs long.
///
/// A zero-length bar is complete from its first step.
pub fn percent_at(step: usize, length: usize) -> f64 {
    if length == 0 {
        return 100.0;
    }
    (step as f64 / length as f64 * 100.0).round()
}

/// Text shown at `step`: the first `step + 1` glyphs of the full bar (never
/// more than the bar holds), a space, then the percentage.
///
/// # Arguments
/// * `glyph` - The fill string; the full bar is `glyph` repeated `length` times
/// * `length` - Bar length in repetitions of `glyph`
/// * `step` - Current step, `0..=length`
/// * `percent` - Rounded percentage for this step
pub fn build_progress_text(glyph: &str, length: usize, step: usize, percent: f64) -> String {
    let capacity = glyph.chars().count().saturating_mul(length);
    let filled = step.saturating_add(1).min(capacity);
    let mut text: String = glyph.chars().cycle().take(filled).collect();
    text.push(' ');
    text.push_str(&format!("{}%", percent));
    text
}

/// An in-flight progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    line: LineId,
    glyph: String,
    length: usize,
    target: f64,
    policy: ProgressPolicy,
    delay: Duration,
    step: usize,
    /// A suspension has been handed out and the step is due when it ends
    pending: bool,
    percent: Option<f64>,
}

impl ProgressBar {
    /// Append the (empty) bar line to the container.
    pub fn begin<C: Container + ?Sized>(
        container: &mut C,
        line: &ResolvedLine,
        policy: ProgressPolicy,
    ) -> Self {
        let id = container.append_line(&line.class);
        container.set_line_text(id, "");

        Self {
            line: id,
            glyph: line.progress_char.clone(),
            length: line.progress_length,
            target: line.progress_percent,
            policy,
            delay: line.type_delay,
            step: 0,
            pending: false,
            percent: None,
        }
    }

    /// Render the step that was due, then hand out the next suspension.
    ///
    /// Returns `None` once the bar has stopped.
    pub fn resume<C: Container + ?Sized>(&mut self, container: &mut C) -> Option<Duration> {
        if self.pending {
            self.pending = false;
            let percent = percent_at(self.step, self.length);
            self.percent = Some(percent);
            container.set_line_text(
                self.line,
                &build_progress_text(&self.glyph, self.length, self.step, percent),
            );

            if self.policy.is_complete(percent, self.target) {
                return None;
            }
            self.step += 1;
            if self.step > self.length {
                return None;
            }
        }

        self.pending = true;
        Some(self.delay)
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    /// Percentage currently displayed, `None` before the first step.
    pub fn percent(&self) -> Option<f64> {
        self.percent
    }
}
