//! Serialization of the arena tree back to markup.
//!
//! The inverse of parsing, with one job: an untouched subtree must
//! round-trip byte-for-byte. Text and comment data were stored raw (no
//! entity decoding), tag and attribute names keep their source case, each
//! attribute remembers its quote style, and the self-closing hint is
//! replayed, so `<DIV>`, `href='x'` and `<br />` all come back exactly as
//! written.

use std::fmt::Write;

use scour_dom::{Attribute, DomTree, NodeId, NodeType, QuoteStyle};

use crate::is_void_element;

/// Serialize the whole tree: the markup of every child of the Document
/// root, in document order.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    inner_html(tree, tree.root())
}

/// Serialize the children of one node ("inner HTML"), excluding the node's
/// own tags.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Append one node's markup (outer HTML) to the buffer.
fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    // Infallible: writing to a String cannot fail.
    match &node.node_type {
        // A Document nested below the root has no markup of its own; its
        // children are emitted in place. The sanitizer treats such a node as
        // fatal long before serialization, so this arm is only exercised by
        // hand-built trees.
        NodeType::Document => {
            for &child in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeType::Element(data) => {
            let _ = write!(out, "<{}", data.source_name);
            for attr in &data.attrs {
                write_attribute(attr, out);
            }
            if data.self_closing {
                out.push_str(" />");
            } else {
                out.push('>');
            }

            if !is_void_element(&data.tag_name) && !data.self_closing {
                for &child in tree.children(id) {
                    write_node(tree, child, out);
                }
                let end = data.end_source_name.as_deref().unwrap_or(&data.source_name);
                let _ = write!(out, "</{end}>");
            }
        }
        NodeType::Text(text) => out.push_str(text),
        NodeType::Comment(data) => {
            let _ = write!(out, "<!--{data}-->");
        }
    }
}

/// Append one attribute, reproducing the source quote style.
fn write_attribute(attr: &Attribute, out: &mut String) {
    let Some(value) = &attr.value else {
        let _ = write!(out, " {}", attr.name);
        return;
    };

    match attr.quote {
        QuoteStyle::Double => {
            let _ = write!(out, " {}=\"{value}\"", attr.name);
        }
        QuoteStyle::Single => {
            let _ = write!(out, " {}='{value}'", attr.name);
        }
        QuoteStyle::Unquoted => {
            let _ = write!(out, " {}={value}", attr.name);
        }
    }
}
