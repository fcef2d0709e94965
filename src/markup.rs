//! Markup-to-descriptor extraction.
//!
//! Elements flagged with `data-<prefix>` inside a container become line
//! descriptors. The flag's value names the line type, sibling attributes
//! `data-<prefix>-<option>` carry per-line overrides, and the element's text
//! is the line value.

use std::collections::BTreeMap;

use crate::config::{normalize_key, parse_float, Options};
use crate::line::{LineData, LineType};

/// Snapshot of one flagged element, as read from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupElement {
    /// All attributes of the element, by full name (`data-ty-delay`)
    pub attributes: BTreeMap<String, String>,
    /// Text content of the element and its descendants
    pub text: String,
}

impl MarkupElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            attributes: BTreeMap::new(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attribute value by exact name, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the element carries the line flag for `prefix`.
    pub fn is_flagged(&self, prefix: &str) -> bool {
        self.attribute(&format!("data-{prefix}")).is_some()
    }

    /// Per-line override `data-<prefix>-<option>`, matched case-insensitively
    /// and in kebab-case. Empty values count as absent.
    fn option(&self, prefix: &str, option: &str) -> Option<&str> {
        let wanted = normalize_key(&format!("data-{prefix}-{option}"));
        self.attributes
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// Convert flagged elements into descriptors, preserving markup order.
pub fn extract_lines(elements: &[MarkupElement], options: &Options) -> Vec<LineData> {
    elements
        .iter()
        .filter(|element| element.is_flagged(&options.prefix))
        .map(|element| line_from_element(element, options))
        .collect()
}

/// Build one descriptor from a flagged element.
///
/// Every timing and visual field is filled: from the element when its
/// attribute parses, otherwise from `options`. A missing or unrecognised
/// flag value yields the configured default type.
pub fn line_from_element(element: &MarkupElement, options: &Options) -> LineData {
    let prefix = options.prefix.as_str();
    let number = |name: &str, fallback: f64| {
        Some(
            element
                .option(prefix, name)
                .and_then(parse_float)
                .unwrap_or(fallback),
        )
    };
    let text = |name: &str, fallback: &str| {
        Some(
            element
                .option(prefix, name)
                .unwrap_or(fallback)
                .to_string(),
        )
    };

    let line_type = element
        .attribute(&format!("data-{prefix}"))
        .and_then(LineType::parse)
        .unwrap_or(options.default_type);

    LineData {
        line_type: Some(line_type),
        value: Some(element.text.clone()),
        prompt: element.option(prefix, "prompt").map(str::to_string),
        start_delay: number("startDelay", options.start_delay),
        type_delay: number("typeDelay", options.type_delay),
        delay: number("delay", options.line_delay),
        progress_length: number("progressLength", options.progress_length),
        progress_char: text("progressChar", &options.progress_char),
        progress_percent: number("progressPercent", options.progress_percent),
        cursor: text("cursor", &options.cursor),
        class: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_value_and_defaults() {
        let options = Options::default();
        let element = MarkupElement::new("loaded").with_attribute("data-ty", "");

        let lines = extract_lines(&[element], &options);

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.line_type, Some(LineType::Output));
        assert_eq!(line.value.as_deref(), Some("loaded"));
        assert_eq!(line.delay, Some(options.line_delay));
        assert_eq!(line.type_delay, Some(options.type_delay));
        assert_eq!(line.progress_char.as_deref(), Some("█"));
        assert!(line.prompt.is_none());
    }

    #[test]
    fn all_overrides_round_trip() {
        let options = Options::default();
        let element = MarkupElement::new("pip install spacy")
            .with_attribute("data-ty", "input")
            .with_attribute("data-ty-startDelay", "11")
            .with_attribute("data-ty-typeDelay", "22")
            .with_attribute("data-ty-delay", "33")
            .with_attribute("data-ty-progressLength", "44")
            .with_attribute("data-ty-progressChar", "#")
            .with_attribute("data-ty-progressPercent", "55")
            .with_attribute("data-ty-cursor", "_")
            .with_attribute("data-ty-prompt", "$");

        let line = line_from_element(&element, &options);

        assert_eq!(line.line_type, Some(LineType::Input));
        assert_eq!(line.start_delay, Some(11.0));
        assert_eq!(line.type_delay, Some(22.0));
        assert_eq!(line.delay, Some(33.0));
        assert_eq!(line.progress_length, Some(44.0));
        assert_eq!(line.progress_char.as_deref(), Some("#"));
        assert_eq!(line.progress_percent, Some(55.0));
        assert_eq!(line.cursor.as_deref(), Some("_"));
        assert_eq!(line.prompt.as_deref(), Some("$"));
    }

    #[test]
    fn lowercased_and_kebab_attributes_are_recognised() {
        let options = Options::default();
        let element = MarkupElement::new("x")
            .with_attribute("data-ty", "progress")
            .with_attribute("data-ty-typedelay", "5")
            .with_attribute("data-ty-progress-percent", "50");

        let line = line_from_element(&element, &options);

        assert_eq!(line.line_type, Some(LineType::Progress));
        assert_eq!(line.type_delay, Some(5.0));
        assert_eq!(line.progress_percent, Some(50.0));
    }

    #[test]
    fn unparseable_numbers_fall_back_to_options() {
        let options = Options {
            type_delay: 70.0,
            ..Options::default()
        };
        let element = MarkupElement::new("x")
            .with_attribute("data-ty", "input")
            .with_attribute("data-ty-typeDelay", "fast");

        let line = line_from_element(&element, &options);
        assert_eq!(line.type_delay, Some(70.0));
    }

    #[test]
    fn unknown_flag_value_uses_default_type() {
        let options = Options {
            default_type: LineType::Input,
            ..Options::default()
        };
        let element = MarkupElement::new("x").with_attribute("data-ty", "shell");

        let line = line_from_element(&element, &options);
        assert_eq!(line.line_type, Some(LineType::Input));
    }

    #[test]
    fn custom_prefix_and_unflagged_elements() {
        let options = Options {
            prefix: "demo".to_string(),
            ..Options::default()
        };
        let elements = vec![
            MarkupElement::new("first").with_attribute("data-demo", "input"),
            MarkupElement::new("ignored").with_attribute("data-ty", "input"),
            MarkupElement::new("second").with_attribute("data-demo", "output"),
        ];

        let lines = extract_lines(&elements, &options);
        let values: Vec<_> = lines.iter().filter_map(|l| l.value.as_deref()).collect();
        assert_eq!(values, vec!["first", "second"]);
    }
}
