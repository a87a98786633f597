//! The validator: read-only whitelist checking.
//!
//! Walks the same tree shape the cleanser mutates, but forward (nothing is
//! removed, so mutation safety is moot) and collects every violation rather
//! than stopping at the first. The result is an aggregate verdict plus the
//! full ordered list of human-readable reasons.

use std::collections::HashSet;

use scour_dom::{ElementData, NodeType, lowercase_tag_set};
use scour_html::{inner_html, parse};

use crate::policy;

/// Checks HTML fragments against a tag whitelist without mutating anything.
///
/// Stricter than [`Cleanser`](crate::Cleanser) on anchor attributes:
/// `title` is kept when cleansing but flagged here. See
/// [`policy`](crate::policy) for why the asymmetry stands.
pub struct Validator {
    /// Lower-cased, deduplicated allowed tag names.
    allowed_tags: HashSet<String>,
}

impl Validator {
    /// Create a validator allowing the given tag names (case-insensitive,
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

    /// Validate a fragment.
    ///
    /// Returns `(valid, errors)`. Parse errors short-circuit the walk: each
    /// becomes one message and the tree is not inspected further (its shape
    /// is not trustworthy). Otherwise every violation in the whole tree is
    /// collected in one forward pass.
    #[must_use]
    pub fn is_valid(&self, html: &str) -> (bool, Vec<String>) {
        let parsed = parse(html);

        if !parsed.errors.is_empty() {
            let errors = parsed
                .errors
                .iter()
                .map(|e| format!("HTML parse error: '{e}'"))
                .collect();
            return (false, errors);
        }

        let tree = parsed.tree;
        let mut violations = Vec::new();

        for id in tree.descendants(tree.root()) {
            let Some(node) = tree.get(id) else {
                continue;
            };

            match &node.node_type {
                NodeType::Comment(data) => {
                    violations.push(format!("HTML comment not allowed: '{data}'"));
                }
                NodeType::Document => {
                    violations.push(format!(
                        "HTML document not allowed: '{}'",
                        inner_html(&tree, id)
                    ));
                }
                NodeType::Element(data) => self.validate_element(data, &mut violations),
                NodeType::Text(_) => {}
            }
        }

        (violations.is_empty(), violations)
    }

    /// Check one element's tag, then (only if the tag is allowed) its
    /// attributes. A disallowed tag is one violation; its attributes are not
    /// piled on top.
    fn validate_element(&self, data: &ElementData, violations: &mut Vec<String>) {
        if !self.allowed_tags.contains(&data.tag_name) {
            violations.push(format!("Tag '{}' not allowed.", data.tag_name));
            return;
        }

        for attr in &data.attrs {
            if !policy::keep_when_validating(&data.tag_name, &attr.name) {
                violations.push(format!(
                    "Attribute '{}' not allowed on '{}' tag.",
                    attr.name, data.tag_name
                ));
            }
        }
    }
}
