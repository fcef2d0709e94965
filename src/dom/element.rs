//! Element handles and their [`Container`] implementation.

use std::fmt;
use std::rc::Rc;

use super::html::{serialize, serialize_children};
use super::{Document, NodeKind};
use crate::config::{parse_float, Dataset};
use crate::container::{dataset_key, Container, LineId, Size};
use crate::markup::MarkupElement;

/// Attribute carrying the cursor glyph on a line being typed.
pub const CURSOR_ATTRIBUTE: &str = "data-cursor";

/// Handle to one element of a [`Document`].
#[derive(Clone)]
pub struct DomElement {
    document: Document,
    node: usize,
}

impl DomElement {
    pub(crate) fn new(document: Document, node: usize) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tag_name(&self) -> String {
        match &self.document.tree().borrow().nodes[self.node].kind {
            NodeKind::Element { name, .. } => name.clone(),
            _ => String::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.document
            .tree()
            .borrow()
            .attribute(self.node, name)
            .map(str::to_string)
    }

    /// Text content of the element and its descendants.
    pub fn inner_text(&self) -> String {
        self.document.tree().borrow().text_content(self.node)
    }

    pub fn inner_html(&self) -> String {
        serialize_children(&self.document.tree().borrow(), self.node)
    }

    pub fn outer_html(&self) -> String {
        serialize(&self.document.tree().borrow(), self.node)
    }

    /// Text of every line rendered into this element, in order.
    pub fn line_texts(&self) -> Vec<String> {
        let tree = self.document.tree().borrow();
        tree.nodes[self.node]
            .children
            .iter()
            .filter(|child| {
                tree.attribute(**child, "class")
                    .is_some_and(|class| class.starts_with("termynal-"))
            })
            .map(|child| tree.text_content(*child))
            .collect()
    }

    /// Pixel value of an inline style property (`width: 320px`).
    fn style_pixels(&self, property: &str) -> f64 {
        self.attribute("style")
            .and_then(|style| style_property(&style, property))
            .and_then(|value| parse_float(&value))
            .unwrap_or(0.0)
    }
}

impl PartialEq for DomElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self.document.tree(), other.document.tree()) && self.node == other.node
    }
}

impl fmt::Debug for DomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomElement")
            .field("node", &self.node)
            .field("tag", &self.tag_name())
            .finish()
    }
}

impl Container for DomElement {
    fn dataset(&self) -> Dataset {
        let tree = self.document.tree().borrow();
        match &tree.nodes[self.node].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .filter_map(|(key, value)| {
                    let rest = key.strip_prefix("data-")?;
                    Some((dataset_key(rest), value.clone()))
                })
                .collect(),
            _ => Dataset::new(),
        }
    }

    fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement> {
        let tree = self.document.tree().borrow();
        tree.descendant_elements(self.node)
            .into_iter()
            .filter(|node| tree.attribute(*node, attribute).is_some())
            .map(|node| {
                let attributes = match &tree.nodes[node].kind {
                    NodeKind::Element { attributes, .. } => attributes.iter().cloned().collect(),
                    _ => Default::default(),
                };
                MarkupElement {
                    attributes,
                    text: tree.text_content(node),
                }
            })
            .collect()
    }

    fn computed_size(&self) -> Size {
        Size::new(self.style_pixels("width"), self.style_pixels("height"))
    }

    fn pin_size(&mut self, width: Option<f64>, min_height: Option<f64>) {
        let mut style = self.attribute("style").unwrap_or_default();
        if let Some(width) = width {
            style = set_style_property(&style, "width", &format!("{width}px"));
        }
        if let Some(min_height) = min_height {
            style = set_style_property(&style, "min-height", &format!("{min_height}px"));
        }
        self.set_attribute("style", &style);
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.document
            .tree()
            .borrow_mut()
            .set_attribute(self.node, name, value);
    }

    fn clear(&mut self) {
        self.document.tree().borrow_mut().clear_children(self.node);
    }

    fn append_line(&mut self, class: &str) -> LineId {
        let mut tree = self.document.tree().borrow_mut();
        let line = tree.push(
            NodeKind::Element {
                name: "pre".to_string(),
                attributes: vec![("class".to_string(), class.to_string())],
            },
            self.node,
        );
        LineId(line)
    }

    fn set_line_text(&mut self, line: LineId, text: &str) {
        let mut tree = self.document.tree().borrow_mut();
        tree.clear_children(line.0);
        if !text.is_empty() {
            tree.push(NodeKind::Text(text.to_string()), line.0);
        }
    }

    fn set_line_cursor(&mut self, line: LineId, cursor: Option<&str>) {
        let mut tree = self.document.tree().borrow_mut();
        match cursor {
            Some(glyph) => tree.set_attribute(line.0, CURSOR_ATTRIBUTE, glyph),
            None => tree.remove_attribute(line.0, CURSOR_ATTRIBUTE),
        }
    }
}

fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(property)
            .then(|| value.trim().to_string())
    })
}

fn set_style_property(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .filter(|declaration| {
            declaration
                .split_once(':')
                .map_or(true, |(name, _)| !name.trim().eq_ignore_ascii_case(property))
        })
        .map(str::to_string)
        .collect();
    declarations.push(format!("{property}: {value}"));
    declarations.join("; ")
}
