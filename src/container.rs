//! The host container the player renders into.
//!
//! A [`Container`] is whatever surface lines end up on: a DOM element, the
//! user's terminal, an asciicast recording. The player only ever reads its
//! markup once during initialisation and afterwards appends lines and
//! rewrites their text.

use std::fmt;

use crate::config::Dataset;
use crate::error::{Result, TermynalError};
use crate::line::LineType;
use crate::markup::MarkupElement;

/// Handle to a line appended to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub usize);

/// Rendered size of a container, in CSS pixels (or cells for terminals).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Surface the player renders into.
pub trait Container {
    /// Data attributes of the container element itself.
    fn dataset(&self) -> Dataset;

    /// Elements inside the container carrying `attribute`, in document order.
    fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement>;

    /// Size as computed by the presentation layer.
    fn computed_size(&self) -> Size;

    /// Pin the box so clearing the content does not collapse it.
    fn pin_size(&mut self, width: Option<f64>, min_height: Option<f64>);

    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove all child content.
    fn clear(&mut self);

    /// Append an empty line carrying `class`.
    fn append_line(&mut self, class: &str) -> LineId;

    /// Replace the text of a previously appended line.
    fn set_line_text(&mut self, line: LineId, text: &str);

    /// Show (`Some`) or hide (`None`) the cursor glyph on a line.
    fn set_line_cursor(&mut self, _line: LineId, _cursor: Option<&str>) {}

    /// Called when the player begins rendering descriptor `index`.
    fn line_started(&mut self, _index: usize, _line_type: LineType) {}
}

/// Markup read from a container before it is cleared.
///
/// Lets a document be the source of lines while another container (a
/// terminal, a recording) is the render target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSnapshot {
    pub dataset: Dataset,
    pub elements: Vec<MarkupElement>,
    pub size: Size,
}

impl ContainerSnapshot {
    /// Capture dataset, flagged elements and size of `container`.
    pub fn capture<C: Container + ?Sized>(container: &C, attribute: &str) -> Self {
        Self {
            dataset: container.dataset(),
            elements: container.flagged_elements(attribute),
            size: container.computed_size(),
        }
    }

    pub fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement> {
        self.elements
            .iter()
            .filter(|element| element.attribute(attribute).is_some())
            .cloned()
            .collect()
    }
}

/// Where to find the container.
pub enum Locator<C> {
    /// Selector resolved against a document
    Selector(String),
    /// A container handle supplied directly
    Element(C),
}

impl<C> fmt::Debug for Locator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::Element(_) => f.write_str("Element(..)"),
        }
    }
}

impl<C> From<&str> for Locator<C> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<C> From<String> for Locator<C> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// A document able to look containers up by selector.
pub trait Resolve {
    type Container: Container;

    /// First element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Container>>;
}

/// Resolve a locator to a container, failing with `ContainerNotFound`.
pub fn resolve<R: Resolve>(
    resolver: &R,
    locator: Locator<R::Container>,
) -> Result<R::Container> {
    match locator {
        Locator::Element(container) => Ok(container),
        Locator::Selector(selector) => resolver
            .query_selector(&selector)?
            .ok_or_else(|| TermynalError::container_not_found(selector)),
    }
}

/// `type-delay` → `typeDelay`, the way browsers build `dataset` keys.
pub(crate) fn dataset_key(attribute: &str) -> String {
    let mut key = String::with_capacity(attribute.len());
    let mut upper = false;
    for c in attribute.chars() {
        if c == '-' {
            upper = true;
        } else if upper && c.is_ascii_lowercase() {
            key.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            if upper {
                key.push('-');
            }
            key.push(c);
            upper = false;
        }
    }
    if upper {
        key.push('-');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_key_conversion() {
        assert_eq!(dataset_key("start-delay"), "startDelay");
        assert_eq!(dataset_key("startdelay"), "startdelay");
        assert_eq!(dataset_key("a-1"), "a-1");
    }
}
