//! The cleanser: destructive whitelist enforcement.
//!
//! One pass over a snapshot of the tree, back to front, mutating in place,
//! then one re-serialization. The reverse order is a correctness
//! requirement, not an optimization: removing a node invalidates the
//! positions of nodes discovered after it in document order, never of nodes
//! discovered before it, so processing the snapshot deepest/rightmost-first
//! guarantees every entry is still validly attached when visited.

use std::collections::HashSet;

use scour_dom::{DomTree, NodeId, NodeType, lowercase_tag_set};
use scour_html::{parse, serialize};

use crate::policy;

/// What the reverse pass decided to do with one node.
///
/// Classification borrows the node; mutation needs the tree. Deciding first
/// and acting second keeps the two phases borrow-disjoint.
enum Action {
    /// Comment: remove outright, promoting nothing.
    Remove,
    /// Disallowed element: remove but splice its children into its place.
    Unwrap,
    /// Allowed element: strip policy-rejected attributes.
    CleanAttributes,
}

/// Removes non-whitelisted markup from HTML fragments.
///
/// A `Cleanser` is configured once with the allowed-tag set and is stateless
/// across calls; each [`clean`](Cleanser::clean) parses, owns and discards
/// its own tree, so one instance may serve any number of calls (or threads)
/// on independent inputs.
pub struct Cleanser {
    /// Lower-cased, deduplicated allowed tag names.
    allowed_tags: HashSet<String>,
}

impl Cleanser {
    /// Create a cleanser allowing the given tag names (case-insensitive,
    /// deduplicated).
    #[must_use]
    pub fn new<I, S>(allowed_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_tags: lowercase_tag_set(allowed_tags),
        }
    }

    /// Clean a fragment: disallowed elements are unwrapped (their content
    /// survives in place), comments are dropped, and attributes outside the
    /// per-tag policy are stripped.
    ///
    /// Malformed input is rejected wholesale — any parse error yields an
    /// empty string, as does the fatal case of a Document node nested below
    /// the root. No repair is ever attempted.
    #[must_use]
    pub fn clean(&self, html: &str) -> String {
        let parsed = parse(html);
        if !parsed.errors.is_empty() {
            return String::new();
        }
        let mut tree = parsed.tree;

        // Snapshot every descendant in document order up front; never
        // re-query the live tree mid-walk.
        let snapshot: Vec<NodeId> = tree.descendants(tree.root()).collect();

        for &id in snapshot.iter().rev() {
            let Some(node) = tree.get(id) else {
                continue;
            };

            let action = match &node.node_type {
                NodeType::Comment(_) => Action::Remove,
                // A Document below the root means the fragment's structure
                // is broken in a way unwrapping cannot express. Fatal.
                NodeType::Document => return String::new(),
                NodeType::Element(data) => {
                    if self.allowed_tags.contains(&data.tag_name) {
                        Action::CleanAttributes
                    } else {
                        Action::Unwrap
                    }
                }
                NodeType::Text(_) => continue,
            };

            match action {
                Action::Remove => {
                    if let Some(parent) = tree.parent(id) {
                        tree.remove_child(parent, id);
                    }
                }
                Action::Unwrap => tree.unwrap_node(id),
                Action::CleanAttributes => clean_attributes(&mut tree, id),
            }
        }

        serialize(&tree)
    }
}

/// Strip the attributes the policy rejects for this element's tag.
///
/// The list is walked in reverse index order so each removal leaves the
/// indices of the not-yet-visited attributes intact, and survivors keep
/// their relative order.
fn clean_attributes(tree: &mut DomTree, id: NodeId) {
    let Some(data) = tree.as_element_mut(id) else {
        return;
    };

    for i in (0..data.attrs.len()).rev() {
        if !policy::keep_when_cleansing(&data.tag_name, &data.attrs[i].name) {
            let _ = data.attrs.remove(i);
        }
    }
}
