//! Line descriptors.
//!
//! A [`LineData`] is one unit of terminal output: a typed command, a block
//! of static output, or a progress bar. Every timing and visual field is an
//! optional override of the merged [`Options`]; [`LineData::resolve`] applies
//! that precedence once so the renderers only ever see effective values.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::config::{millis, Options};

/// Kind of line, selecting the renderer used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Typed character by character, optionally after a prompt
    Input,
    /// Appended in one go
    Output,
    /// Animated progress bar
    Progress,
}

impl LineType {
    /// Coerce a markup or script value into a line type.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for empty or unrecognised values so the caller can
    /// fall back to its configured default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }

    /// Name used in markup and scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Progress => "progress",
        }
    }

    /// Structural class set on rendered lines of this kind.
    pub fn structural_class(&self) -> &'static str {
        match self {
            Self::Input => "termynal-input",
            Self::Output => "termynal-output",
            Self::Progress => "termynal-progress",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured line of terminal output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineData {
    #[serde(
        rename = "type",
        deserialize_with = "lenient_line_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_delay: Option<f64>,
    /// Pause after the line, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_char: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Unknown `type` strings in scripts degrade to "unset" instead of failing.
fn lenient_line_type<'de, D>(deserializer: D) -> Result<Option<LineType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(LineType::parse))
}

impl LineData {
    /// A typed input line.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            line_type: Some(LineType::Input),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A static output line.
    pub fn output(value: impl Into<String>) -> Self {
        Self {
            line_type: Some(LineType::Output),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A progress bar.
    pub fn progress() -> Self {
        Self {
            line_type: Some(LineType::Progress),
            ..Self::default()
        }
    }

    /// A line without an explicit type; it plays as the configured default.
    pub fn untyped(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_delay(mut self, ms: f64) -> Self {
        self.delay = Some(ms);
        self
    }

    #[must_use]
    pub fn with_type_delay(mut self, ms: f64) -> Self {
        self.type_delay = Some(ms);
        self
    }

    #[must_use]
    pub fn with_progress_length(mut self, length: f64) -> Self {
        self.progress_length = Some(length);
        self
    }

    #[must_use]
    pub fn with_progress_char(mut self, glyph: impl Into<String>) -> Self {
        self.progress_char = Some(glyph.into());
        self
    }

    #[must_use]
    pub fn with_progress_percent(mut self, percent: f64) -> Self {
        self.progress_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// A copy with every unset field taken from `options`, still in
    /// descriptor form (milliseconds, raw lengths). `prompt` and `class`
    /// stay optional.
    pub fn filled(&self, options: &Options) -> LineData {
        LineData {
            line_type: Some(self.line_type.unwrap_or(options.default_type)),
            value: Some(self.value.clone().unwrap_or_default()),
            prompt: self.prompt.clone(),
            start_delay: Some(self.start_delay.unwrap_or(options.start_delay)),
            type_delay: Some(self.type_delay.unwrap_or(options.type_delay)),
            delay: Some(self.delay.unwrap_or(options.line_delay)),
            progress_length: Some(self.progress_length.unwrap_or(options.progress_length)),
            progress_char: Some(
                self.progress_char
                    .clone()
                    .unwrap_or_else(|| options.progress_char.clone()),
            ),
            progress_percent: Some(self.progress_percent.unwrap_or(options.progress_percent)),
            cursor: Some(
                self.cursor
                    .clone()
                    .unwrap_or_else(|| options.cursor.clone()),
            ),
            class: self.class.clone(),
        }
    }

    /// Apply the line → configuration precedence to every field.
    pub fn resolve(&self, options: &Options) -> ResolvedLine {
        let line_type = self.line_type.unwrap_or(options.default_type);
        let extra_class = self
            .class
            .clone()
            .unwrap_or_else(|| options.class_name.clone());

        ResolvedLine {
            line_type,
            value: self.value.clone().unwrap_or_default(),
            prompt: self.prompt.clone(),
            type_delay: millis(self.type_delay.unwrap_or(options.type_delay)),
            delay: millis(self.delay.unwrap_or(options.line_delay)),
            progress_length: bar_length(
                self.progress_length.unwrap_or(options.progress_length),
            ),
            progress_char: self
                .progress_char
                .clone()
                .unwrap_or_else(|| options.progress_char.clone()),
            progress_percent: self.progress_percent.unwrap_or(options.progress_percent),
            cursor: self
                .cursor
                .clone()
                .unwrap_or_else(|| options.cursor.clone()),
            class: compose_class(line_type, &extra_class),
        }
    }
}

/// Cut `text` to at most `width` display columns.
pub fn fit_to_width(text: &str, width: Option<usize>) -> &str {
    let Some(width) = width else {
        return text;
    };
    let mut used = 0;
    for (offset, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[..offset];
        }
    }
    text
}

/// Longest progress bar, in glyphs.
pub const MAX_PROGRESS_LENGTH: usize = 10_000;

/// Bar lengths are whole characters; fractional and negative lengths floor
/// towards zero and anything longer than [`MAX_PROGRESS_LENGTH`] is capped.
fn bar_length(length: f64) -> usize {
    if length.is_nan() || length <= 0.0 {
        0
    } else {
        (length.floor() as usize).min(MAX_PROGRESS_LENGTH)
    }
}

fn compose_class(line_type: LineType, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        line_type.structural_class().to_string()
    } else {
        format!("{} {}", line_type.structural_class(), extra)
    }
}

/// A line with every field resolved against the merged configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub line_type: LineType,
    pub value: String,
    pub prompt: Option<String>,
    pub type_delay: Duration,
    pub delay: Duration,
    pub progress_length: usize,
    pub progress_char: String,
    pub progress_percent: f64,
    pub cursor: String,
    /// Structural class plus the line's (or configured) custom class
    pub class: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_type_parse_is_lenient() {
        assert_eq!(LineType::parse("input"), Some(LineType::Input));
        assert_eq!(LineType::parse(" Progress "), Some(LineType::Progress));
        assert_eq!(LineType::parse("OUTPUT"), Some(LineType::Output));
        assert_eq!(LineType::parse(""), None);
        assert_eq!(LineType::parse("banana"), None);
    }

    #[test]
    fn resolve_prefers_line_overrides() {
        let options = Options::default();
        let line = LineData::input("ls")
            .with_type_delay(10.0)
            .with_delay(0.0)
            .with_class("shell");

        let resolved = line.resolve(&options);

        assert_eq!(resolved.type_delay, Duration::from_millis(10));
        // An explicit zero delay is honoured, not treated as "unset"
        assert_eq!(resolved.delay, Duration::ZERO);
        assert_eq!(resolved.class, "termynal-input shell");
    }

    #[test]
    fn resolve_falls_back_to_options() {
        let options = Options {
            class_name: "demo".to_string(),
            ..Options::default()
        };
        let resolved = LineData::untyped("hello").resolve(&options);

        assert_eq!(resolved.line_type, LineType::Output);
        assert_eq!(resolved.type_delay, Duration::from_millis(50));
        assert_eq!(resolved.delay, Duration::from_millis(1500));
        assert_eq!(resolved.progress_length, 40);
        assert_eq!(resolved.progress_char, "█");
        assert_eq!(resolved.cursor, "▋");
        assert_eq!(resolved.class, "termynal-output demo");
    }

    #[test]
    fn resolve_untyped_line_uses_configured_default_type() {
        let options = Options {
            default_type: LineType::Input,
            ..Options::default()
        };
        let resolved = LineData::untyped("whoami").resolve(&options);
        assert_eq!(resolved.line_type, LineType::Input);
    }

    #[test]
    fn resolve_missing_value_is_empty() {
        let resolved = LineData::progress().resolve(&Options::default());
        assert_eq!(resolved.value, "");
        assert!(resolved.prompt.is_none());
    }

    #[test]
    fn filled_keeps_overrides_and_fills_the_rest() {
        let options = Options::default();
        let filled = LineData::untyped("x").with_delay(0.0).filled(&options);

        assert_eq!(filled.line_type, Some(LineType::Output));
        assert_eq!(filled.delay, Some(0.0));
        assert_eq!(filled.type_delay, Some(50.0));
        assert_eq!(filled.cursor.as_deref(), Some("▋"));
        assert!(filled.prompt.is_none());
    }

    #[test]
    fn fit_to_width_counts_display_columns() {
        assert_eq!(fit_to_width("hello", Some(3)), "hel");
        assert_eq!(fit_to_width("日本語", Some(4)), "日本");
        assert_eq!(fit_to_width("short", Some(10)), "short");
        assert_eq!(fit_to_width("any", None), "any");
    }

    #[test]
    fn bar_length_floors_and_clamps() {
        assert_eq!(bar_length(40.0), 40);
        assert_eq!(bar_length(12.9), 12);
        assert_eq!(bar_length(-3.0), 0);
        assert_eq!(bar_length(f64::NAN), 0);
        assert_eq!(bar_length(1e19), MAX_PROGRESS_LENGTH);
        assert_eq!(bar_length(f64::INFINITY), MAX_PROGRESS_LENGTH);
    }

    #[test]
    fn deserialize_script_line_with_camel_case_keys() {
        let json = r#"{"type":"input","value":"y","prompt":"(y/n)","typeDelay":1000}"#;
        let line: LineData = serde_json::from_str(json).unwrap();

        assert_eq!(line.line_type, Some(LineType::Input));
        assert_eq!(line.prompt.as_deref(), Some("(y/n)"));
        assert_eq!(line.type_delay, Some(1000.0));
    }

    #[test]
    fn deserialize_unknown_type_degrades_to_unset() {
        let line: LineData = serde_json::from_str(r#"{"type":"shell","value":"x"}"#).unwrap();
        assert_eq!(line.line_type, None);
    }
}
