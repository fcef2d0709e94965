//! Colours used when drawing lines in a real terminal.
//!
//! Lines are coloured by their structural class, the same hook a stylesheet
//! uses in the browser.

use crossterm::style::Color;

use crate::line::LineType;

/// Colour scheme for terminal playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Typed commands
    pub input: Color,
    /// Static output
    pub output: Color,
    /// Progress bars
    pub progress: Color,
    /// Cursor glyph shown while typing
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// White commands over grey output, green bars.
    pub fn classic() -> Self {
        Self {
            input: Color::White,
            output: Color::Grey,
            progress: Color::Green,
            cursor: Color::Green,
        }
    }

    pub fn ocean() -> Self {
        Self {
            input: Color::Cyan,
            output: Color::Grey,
            progress: Color::Blue,
            cursor: Color::DarkCyan,
        }
    }

    /// Theme by name, as accepted by `--theme`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "ocean" => Some(Self::ocean()),
            _ => None,
        }
    }

    pub fn color_for(&self, line_type: LineType) -> Color {
        match line_type {
            LineType::Input => self.input,
            LineType::Output => self.output,
            LineType::Progress => self.progress,
        }
    }

    /// Colour for a line from its class list; the first structural class
    /// wins, anything else is drawn as output.
    pub fn color_for_class(&self, class: &str) -> Color {
        class
            .split_whitespace()
            .find_map(|name| match name {
                "termynal-input" => Some(LineType::Input),
                "termynal-output" => Some(LineType::Output),
                "termynal-progress" => Some(LineType::Progress),
                _ => None,
            })
            .map_or(self.output, |line_type| self.color_for(line_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_classic() {
        assert_eq!(Theme::default(), Theme::classic());
    }

    #[test]
    fn class_lookup_uses_structural_class() {
        let theme = Theme::classic();
        assert_eq!(theme.color_for_class("termynal-input custom"), Color::White);
        assert_eq!(theme.color_for_class("custom termynal-progress"), Color::Green);
        assert_eq!(theme.color_for_class("unknown"), theme.output);
    }

    #[test]
    fn themes_by_name() {
        assert_eq!(Theme::by_name("Ocean"), Some(Theme::ocean()));
        assert_eq!(Theme::by_name("neon"), None);
    }
}
