//! In-memory HTML document host.
//!
//! HTML is parsed once with `scraper` and copied into a small mutable node
//! arena, which is what the player renders into. Selector lookups are
//! evaluated against the document as it was loaded.
//!
//! Handles are cheap clones sharing one tree, so several players can render
//! into different containers of the same page.

mod element;
mod html;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node as HtmlNode, Selector};

pub use element::{DomElement, CURSOR_ATTRIBUTE};

use crate::container::Resolve;
use crate::error::{Result, TermynalError};

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Document,
    Doctype(String),
    /// Contents of a `template` element; inert for lookups and text.
    Fragment,
    Comment(String),
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct Tree {
    source: Html,
    pub nodes: Vec<Node>,
    /// Arena index of every live element of `source`
    elements: HashMap<NodeId, usize>,
    /// The document node
    pub document: usize,
    /// The `html` element
    pub root: usize,
}

impl Tree {
    fn from_html(source: Html) -> Self {
        let mut nodes = Vec::new();
        let mut elements = HashMap::new();
        let document = copy_node(source.tree.root(), None, false, &mut nodes, &mut elements);
        let root = elements
            .get(&source.root_element().id())
            .copied()
            .unwrap_or(document);
        Self {
            source,
            nodes,
            elements,
            document,
            root,
        }
    }

    pub fn push(&mut self, kind: NodeKind, parent: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Detach every child of `parent`.
    pub fn clear_children(&mut self, parent: usize) {
        for child in std::mem::take(&mut self.nodes[parent].children) {
            self.nodes[child].parent = None;
        }
    }

    pub fn attribute(&self, node: usize, name: &str) -> Option<&str> {
        match &self.nodes[node].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, node: usize, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node].kind {
            match attributes
                .iter_mut()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
            {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, node: usize, name: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node].kind {
            attributes.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        }
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: usize) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: usize, out: &mut String) {
        match &self.nodes[node].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &self.nodes[node].children {
                    self.collect_text(*child, out);
                }
            }
            _ => {}
        }
    }

    /// Element descendants of `node` in document order, `node` excluded.
    pub fn descendant_elements(&self, node: usize) -> Vec<usize> {
        let mut found = Vec::new();
        let mut stack: Vec<usize> = self.nodes[node].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if matches!(self.nodes[current].kind, NodeKind::Element { .. }) {
                found.push(current);
                stack.extend(self.nodes[current].children.iter().rev());
            }
        }
        found
    }
}

/// Copy `node` and its subtree into the arena, pre-order.
///
/// Elements are indexed by their source id unless they sit inside template
/// contents, which selectors never match.
fn copy_node(
    node: NodeRef<'_, HtmlNode>,
    parent: Option<usize>,
    inert: bool,
    nodes: &mut Vec<Node>,
    elements: &mut HashMap<NodeId, usize>,
) -> usize {
    let kind = match node.value() {
        HtmlNode::Document => NodeKind::Document,
        HtmlNode::Fragment => NodeKind::Fragment,
        HtmlNode::Doctype(doctype) => NodeKind::Doctype(doctype.name().to_string()),
        HtmlNode::Comment(comment) => NodeKind::Comment(comment.comment.to_string()),
        HtmlNode::Text(text) => NodeKind::Text(text.text.to_string()),
        HtmlNode::Element(element) => NodeKind::Element {
            name: element.name().to_string(),
            attributes: element
                .attrs
                .iter()
                .map(|(key, value)| {
                    let name = match &key.prefix {
                        Some(prefix) => format!("{prefix}:{}", key.local),
                        None => key.local.to_string(),
                    };
                    (name, value.to_string())
                })
                .collect(),
        },
        // Processing instructions never come out of the HTML parser
        _ => NodeKind::Fragment,
    };

    let index = nodes.len();
    let is_element = matches!(kind, NodeKind::Element { .. });
    let inert = inert || matches!(kind, NodeKind::Fragment);
    nodes.push(Node {
        kind,
        parent,
        children: Vec::new(),
    });
    if is_element && !inert {
        elements.insert(node.id(), index);
    }

    for child in node.children() {
        let child_index = copy_node(child, Some(index), inert, nodes, elements);
        nodes[index].children.push(child_index);
    }
    index
}

/// A parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
}

impl Document {
    /// Parse a full document (fragments are wrapped in `html`/`body`).
    pub fn parse(source: &str) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::from_html(Html::parse_document(source)))),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<DomElement>> {
        let parsed = Selector::parse(selector).map_err(|e| TermynalError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        let tree = self.tree.borrow();
        let matches = tree
            .source
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| parsed.matches(element))
            .filter_map(|element| tree.elements.get(&element.id()))
            .map(|index| DomElement::new(self.clone(), *index))
            .collect();
        Ok(matches)
    }

    pub fn element_by_id(&self, id: &str) -> Option<DomElement> {
        let tree = self.tree.borrow();
        tree.descendant_elements(tree.root)
            .into_iter()
            .chain(std::iter::once(tree.root))
            .find(|node| tree.attribute(*node, "id") == Some(id))
            .map(|node| DomElement::new(self.clone(), node))
    }

    /// The `html` element.
    pub fn root(&self) -> DomElement {
        let root = self.tree.borrow().root;
        DomElement::new(self.clone(), root)
    }

    /// Serialise the current state of the document, doctype included.
    pub fn to_html(&self) -> String {
        let tree = self.tree.borrow();
        html::serialize_children(&tree, tree.document)
    }

    pub(crate) fn tree(&self) -> &Rc<RefCell<Tree>> {
        &self.tree
    }
}

impl Resolve for Document {
    type Container = DomElement;

    fn query_selector(&self, selector: &str) -> Result<Option<DomElement>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }
}
