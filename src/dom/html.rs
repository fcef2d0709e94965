//! HTML serialisation of the node arena.

use super::{NodeKind, Tree};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text is written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub(crate) fn serialize(tree: &Tree, node: usize) -> String {
    let mut out = String::new();
    write_node(tree, node, false, &mut out);
    out
}

pub(crate) fn serialize_children(tree: &Tree, node: usize) -> String {
    let mut out = String::new();
    let raw = is_raw_text(tree, node);
    for child in &tree.nodes[node].children {
        write_node(tree, *child, raw, &mut out);
    }
    out
}

fn is_raw_text(tree: &Tree, node: usize) -> bool {
    matches!(&tree.nodes[node].kind, NodeKind::Element { name, .. } if RAW_TEXT_ELEMENTS.contains(&name.as_str()))
}

fn write_node(tree: &Tree, node: usize, raw: bool, out: &mut String) {
    match &tree.nodes[node].kind {
        NodeKind::Document | NodeKind::Fragment => out.push_str(&serialize_children(tree, node)),
        NodeKind::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::Text(text) if raw => out.push_str(text),
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element { name, attributes } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&name.as_str()) {
                return;
            }
            out.push_str(&serialize_children(tree, node));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
