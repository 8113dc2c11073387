//! Snapshot rendering helpers.
//!
//! Serializes the document into indented, HTML-like text suitable for
//! snapshot testing and assertions. Attributes are written in a fixed order
//! (`class`, the remaining attributes sorted by name, then `style`), so
//! output is stable.

use std::fmt::Write;

use crate::dom::node::{NodeData, NodeId, NodeKind};
use crate::dom::tree::Document;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Serialize every child of the body, one subtree after another.
///
/// # Examples
///
/// ```
/// use toastkit::dom::{Document, NodeData};
/// use toastkit::testing::document_to_string;
///
/// let mut doc = Document::new();
/// let div = doc.create_element(NodeData::element("div").with_class("note"));
/// doc.set_text(div, "hi");
/// doc.append_child(doc.body(), div);
/// assert_eq!(document_to_string(&doc), "<div class=\"note\">hi</div>");
/// ```
pub fn document_to_string(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.body()) {
        write_node(doc, child, 0, &mut out);
    }
    trim_trailing_newline(out)
}

/// Serialize the subtree rooted at `node`. Empty if the node is gone.
pub fn node_to_string(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, 0, &mut out);
    trim_trailing_newline(out)
}

/// The opening tag of an element, e.g. `<div class="a" style="top: 1px">`.
pub fn open_tag(data: &NodeData) -> String {
    let mut out = String::new();
    let tag = data.tag().unwrap_or_default();
    out.push('<');
    out.push_str(tag);
    if !data.classes.is_empty() {
        write_attr(&mut out, "class", &data.classes.join(" "));
    }
    for (name, value) in &data.attributes {
        write_attr(&mut out, name, value);
    }
    if !data.styles().is_empty() {
        let style = data
            .styles()
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        write_attr(&mut out, "style", &style);
    }
    out.push('>');
    out
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn write_node(doc: &Document, node: NodeId, depth: usize, out: &mut String) {
    let Some(data) = doc.get(node) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match &data.kind {
        NodeKind::Text(text) => {
            let _ = writeln!(out, "{indent}{}", escape_text(text));
        }
        NodeKind::Markup(raw) => {
            let _ = writeln!(out, "{indent}{raw}");
        }
        NodeKind::Element(tag) => {
            let children = doc.children(node);
            let open = open_tag(data);
            match children {
                [] => {
                    let _ = writeln!(out, "{indent}{open}</{tag}>");
                }
                [only] if is_leaf_content(doc, *only) => {
                    let inline = match doc.get(*only).map(|d| &d.kind) {
                        Some(NodeKind::Text(text)) => escape_text(text),
                        Some(NodeKind::Markup(raw)) => raw.clone(),
                        _ => String::new(),
                    };
                    let _ = writeln!(out, "{indent}{open}{inline}</{tag}>");
                }
                _ => {
                    let _ = writeln!(out, "{indent}{open}");
                    for &child in children {
                        write_node(doc, child, depth + 1, out);
                    }
                    let _ = writeln!(out, "{indent}</{tag}>");
                }
            }
        }
    }
}

fn is_leaf_content(doc: &Document, node: NodeId) -> bool {
    doc.get(node).is_some_and(|d| !d.is_element())
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn trim_trailing_newline(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document() {
        assert_eq!(document_to_string(&Document::new()), "");
    }

    #[test]
    fn attribute_order_is_stable() {
        let data = NodeData::element("input")
            .with_style("display", "none")
            .with_attribute("value", "v")
            .with_attribute("type", "text")
            .with_class("kv-key");
        assert_eq!(
            open_tag(&data),
            "<input class=\"kv-key\" type=\"text\" value=\"v\" style=\"display: none\">"
        );
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut doc = Document::new();
        let outer = doc.create_element(NodeData::element("div").with_class("a"));
        let first = doc.create_element(NodeData::element("span"));
        let second = doc.create_element(NodeData::element("p"));
        doc.set_text(first, "x < y");
        doc.append_child(outer, first);
        doc.append_child(outer, second);
        doc.append_child(doc.body(), outer);
        assert_eq!(
            document_to_string(&doc),
            "<div class=\"a\">\n  <span>x &lt; y</span>\n  <p></p>\n</div>"
        );
    }

    #[test]
    fn markup_is_written_raw() {
        let mut doc = Document::new();
        let div = doc.create_element(NodeData::element("div"));
        doc.set_inner_markup(div, "<b>Saved</b>");
        assert_eq!(node_to_string(&doc, div), "<div><b>Saved</b></div>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let data = NodeData::element("a").with_attribute("href", "/?a=1&b=\"2\"");
        assert_eq!(open_tag(&data), "<a href=\"/?a=1&amp;b=&quot;2&quot;\">");
    }

    #[test]
    fn removed_node_serializes_empty() {
        let mut doc = Document::new();
        let div = doc.create_element(NodeData::element("div"));
        doc.remove(div);
        assert_eq!(node_to_string(&doc, div), "");
    }
}
