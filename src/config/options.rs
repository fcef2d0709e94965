//! Player options and their three-layer merge.
//!
//! Options are merged from, lowest to highest precedence:
//! 1. built-in defaults ([`Options::default`])
//! 2. caller options (a [`PartialOptions`] from code, a script, the CLI)
//! 3. container data-attributes ([`PartialOptions::from_dataset`])
//!
//! Each field is merged independently and the winning layer is recorded in
//! [`MergedOptions`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::line::LineType;

/// Data attributes of an element, keyed by the part after `data-`.
pub type Dataset = BTreeMap<String, String>;

/// When a progress bar stops filling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPolicy {
    /// Stop on the first step whose percentage exceeds the target
    #[default]
    Overshoot,
    /// Stop on the first step whose percentage reaches the target
    Exact,
}

impl ProgressPolicy {
    /// Whether a bar showing `percent` has finished for `target`.
    pub fn is_complete(&self, percent: f64, target: f64) -> bool {
        match self {
            Self::Overshoot => percent > target,
            Self::Exact => percent >= target,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overshoot" => Some(Self::Overshoot),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Fully resolved player options.
///
/// Delays are in milliseconds, as in the markup contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Attribute namespace used to discover markup lines (`data-<prefix>`)
    pub prefix: String,
    pub start_delay: f64,
    pub type_delay: f64,
    /// Pause after a line that has no `delay` of its own
    pub line_delay: f64,
    pub progress_length: f64,
    pub progress_char: String,
    pub progress_percent: f64,
    /// Cursor glyph, a styling hint for hosts
    pub cursor: String,
    pub autoplay: bool,
    pub class_name: String,
    /// Type used for lines that do not name one
    pub default_type: LineType,
    pub progress_policy: ProgressPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: "ty".to_string(),
            start_delay: 600.0,
            type_delay: 50.0,
            line_delay: 1500.0,
            progress_length: 40.0,
            progress_char: "█".to_string(),
            progress_percent: 100.0,
            cursor: "▋".to_string(),
            autoplay: false,
            class_name: String::new(),
            default_type: LineType::Output,
            progress_policy: ProgressPolicy::Overshoot,
        }
    }
}

impl Options {
    /// Name of the attribute flagging markup lines.
    pub fn line_attribute(&self) -> String {
        format!("data-{}", self.prefix)
    }

    pub fn start_delay_duration(&self) -> Duration {
        millis(self.start_delay)
    }
}

/// Options where every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_char: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_policy: Option<ProgressPolicy>,
}

/// Invokes `$mac!(field, Variant)` for every option field.
macro_rules! for_each_field {
    ($mac:ident) => {
        $mac!(prefix, Prefix);
        $mac!(start_delay, StartDelay);
        $mac!(type_delay, TypeDelay);
        $mac!(line_delay, LineDelay);
        $mac!(progress_length, ProgressLength);
        $mac!(progress_char, ProgressChar);
        $mac!(progress_percent, ProgressPercent);
        $mac!(cursor, Cursor);
        $mac!(autoplay, Autoplay);
        $mac!(class_name, ClassName);
        $mac!(default_type, DefaultType);
        $mac!(progress_policy, ProgressPolicy);
    };
}

impl PartialOptions {
    /// Parse container data-attributes into options.
    ///
    /// Total: never fails. Only the instance-level attributes of the markup
    /// contract are read (`startDelay`, `typeDelay`, `lineDelay`,
    /// `progressLength`, `progressChar`, `progressPercent`, `cursor`). Keys
    /// match case-insensitively and in kebab-case. Empty values and numbers
    /// that do not parse are treated as absent.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let lookup = |name: &str| dataset_value(dataset, name);

        Self {
            start_delay: lookup("startDelay").and_then(parse_float),
            type_delay: lookup("typeDelay").and_then(parse_float),
            line_delay: lookup("lineDelay").and_then(parse_float),
            progress_length: lookup("progressLength").and_then(parse_float),
            progress_char: lookup("progressChar").map(str::to_string),
            progress_percent: lookup("progressPercent").and_then(parse_float),
            cursor: lookup("cursor").map(str::to_string),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn overlay(mut self, other: &PartialOptions) -> Self {
        macro_rules! take {
            ($field:ident, $_variant:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field.clone();
                }
            };
        }
        for_each_field!(take);
        self
    }

    /// Fields that are set, in declaration order.
    pub fn present_fields(&self) -> Vec<OptionField> {
        let mut fields = Vec::new();
        macro_rules! collect {
            ($field:ident, $variant:ident) => {
                if self.$field.is_some() {
                    fields.push(OptionField::$variant);
                }
            };
        }
        for_each_field!(collect);
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

/// Statically enumerated option fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionField {
    Prefix,
    StartDelay,
    TypeDelay,
    LineDelay,
    ProgressLength,
    ProgressChar,
    ProgressPercent,
    Cursor,
    Autoplay,
    ClassName,
    DefaultType,
    ProgressPolicy,
}

impl OptionField {
    pub const ALL: [OptionField; 12] = [
        Self::Prefix,
        Self::StartDelay,
        Self::TypeDelay,
        Self::LineDelay,
        Self::ProgressLength,
        Self::ProgressChar,
        Self::ProgressPercent,
        Self::Cursor,
        Self::Autoplay,
        Self::ClassName,
        Self::DefaultType,
        Self::ProgressPolicy,
    ];

    /// camelCase key used in scripts and data-attributes.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::StartDelay => "startDelay",
            Self::TypeDelay => "typeDelay",
            Self::LineDelay => "lineDelay",
            Self::ProgressLength => "progressLength",
            Self::ProgressChar => "progressChar",
            Self::ProgressPercent => "progressPercent",
            Self::Cursor => "cursor",
            Self::Autoplay => "autoplay",
            Self::ClassName => "className",
            Self::DefaultType => "defaultType",
            Self::ProgressPolicy => "progressPolicy",
        }
    }
}

impl fmt::Display for OptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Layer a merged field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionSource {
    Default,
    Caller,
    Markup,
}

/// Merged options plus per-field provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedOptions {
    pub options: Options,
    provenance: BTreeMap<OptionField, OptionSource>,
}

impl MergedOptions {
    /// Merge defaults, caller options and markup options, in that order.
    pub fn merge(caller: &PartialOptions, markup: &PartialOptions) -> Self {
        let mut options = Options::default();
        let mut provenance: BTreeMap<OptionField, OptionSource> = OptionField::ALL
            .iter()
            .map(|field| (*field, OptionSource::Default))
            .collect();

        for (layer, source) in [(caller, OptionSource::Caller), (markup, OptionSource::Markup)] {
            macro_rules! apply {
                ($field:ident, $variant:ident) => {
                    if let Some(value) = &layer.$field {
                        options.$field = value.clone();
                        provenance.insert(OptionField::$variant, source);
                    }
                };
            }
            for_each_field!(apply);
        }

        Self {
            options,
            provenance,
        }
    }

    /// Which layer supplied `field`.
    pub fn source(&self, field: OptionField) -> OptionSource {
        self.provenance
            .get(&field)
            .copied()
            .unwrap_or(OptionSource::Default)
    }

    pub fn into_options(self) -> Options {
        self.options
    }
}

/// Look up a data-attribute by option name, ignoring case, `-` and `_`.
/// Empty values count as absent.
fn dataset_value<'a>(dataset: &'a Dataset, name: &str) -> Option<&'a str> {
    let wanted = normalize_key(name);
    dataset
        .iter()
        .find(|(key, _)| normalize_key(key) == wanted)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse the leading decimal number of `value`, like the browser's
/// `parseFloat` (`"300ms"` is 300). Non-finite or missing numbers are `None`.
pub(crate) fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    // Optional exponent, only taken when complete
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Milliseconds to a `Duration`; negative and non-finite values are zero.
pub fn millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        // Saturating cast
        Duration::from_nanos((ms * 1_000_000.0).round() as u64)
    } else {
        Duration::ZERO
    }
}
