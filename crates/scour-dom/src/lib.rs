//! Arena DOM tree for the scour sanitizer.
//!
//! This crate provides an arena-based document tree loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), trimmed to the four
//! node kinds a sanitizer has to reason about: Document, Element, Text and
//! Comment.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Unlike a rendering DOM, element attributes are kept as an
//! **ordered list** rather than a map: the cleansing pass removes attributes
//! by index while walking the list in reverse, and the order of survivors
//! must be stable so untouched markup serializes back byte-for-byte.

use std::collections::HashSet;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// How an attribute value was delimited in the source.
///
/// Recorded at parse time and replayed by the serializer so an untouched
/// attribute comes back exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `name="value"`
    Double,
    /// `name='value'`
    Single,
    /// `name=value`
    Unquoted,
}

/// A single name/value pair on an element.
///
/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// The value is `None` for bare boolean-style attributes (`<input disabled>`)
/// so the serializer can reproduce them without inventing an `=""`.
/// Attribute names keep their source spelling; comparisons are done
/// case-insensitively at the point of use, never by rewriting the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name as it appeared in the source.
    pub name: String,
    /// The attribute value, or `None` when no `=` was present.
    pub value: Option<String>,
    /// How the value was quoted in the source. Meaningless when `value` is
    /// `None`.
    pub quote: QuoteStyle,
}

impl Attribute {
    /// Create a new attribute with the given name and value, double-quoted.
    #[must_use]
    pub const fn new(name: String, value: Option<String>) -> Self {
        Self {
            name,
            value,
            quote: QuoteStyle::Double,
        }
    }

    /// Case-insensitive name comparison.
    ///
    /// Attribute names are ASCII per the HTML syntax, so ASCII case folding
    /// is sufficient here.
    #[must_use]
    pub fn name_eq_ignore_case(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

/// Element-specific data.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
///
/// Only the local name, the ordered attribute list and the self-closing
/// serialization hint are stored; namespaces and custom elements are out of
/// scope for fragment sanitization.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's local name, always ASCII lower-cased at parse time.
    /// All tag comparisons go through this field.
    pub tag_name: String,
    /// The start tag's name as it appeared in the source (`DIV`, `Div`, ...).
    /// Purely a serialization hint; never compared.
    pub source_name: String,
    /// The matching end tag's name as it appeared in the source, when one was
    /// seen. `None` for voids, self-closed elements and hand-built trees.
    pub end_source_name: Option<String>,
    /// The element's attribute list, in source order.
    pub attrs: Vec<Attribute>,
    /// Whether the start tag used self-closing syntax (`<br />`).
    ///
    /// Purely a serialization hint so `<br />` round-trips as written
    /// instead of collapsing to `<br>`.
    pub self_closing: bool,
}

impl ElementData {
    /// Create element data for a tag with no attributes. The given name is
    /// used for both the canonical and the source spelling.
    #[must_use]
    pub fn new(tag_name: String) -> Self {
        Self {
            source_name: tag_name.clone(),
            tag_name,
            end_source_name: None,
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    /// Look up an attribute value by case-insensitive name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name_eq_ignore_case(name))
            .and_then(|a| a.value.as_deref())
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
///
/// The enum is closed and matched exhaustively by every consumer, so a new
/// node kind is a compile-time decision rather than a runtime fallthrough
/// that could let unsanitized content slip past the cleanser.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    ///
    /// Exactly one per tree, at [`NodeId::ROOT`]. A Document appearing as a
    /// descendant indicates malformed nesting and is treated as fatal by the
    /// sanitizer.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    ///
    /// Raw text content. Entity references are not decoded; `&nbsp;` is
    /// stored and re-serialized as written.
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// `None` only for the Document root and for detached nodes.
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// Children in document order.
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]. Structural
/// mutation detaches nodes rather than freeing them; a detached node stays in
/// the arena but is unreachable from the root, which is all serialization and
/// traversal ever look at. One tree serves exactly one sanitization call, so
/// the small amount of garbage is irrelevant.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena, detached nodes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (it never is; the Document is always there).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Insert `child` into `parent`'s child list immediately before
    /// `reference`, updating all relationships.
    ///
    /// # Panics
    ///
    /// Panics if `reference` is not a child of `parent`, which indicates a
    /// caller bug.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let idx = self
            .child_index(parent, reference)
            .expect("insert_before: reference is not a child of parent");

        self.nodes[parent.0].children.insert(idx, child);
        self.nodes[child.0].parent = Some(parent);
        self.relink_children(parent);
    }

    /// [§ 4.2.2 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`. The child's own subtree is untouched;
    /// it simply becomes unreachable from the root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(idx) = self.child_index(parent, child) else {
            return;
        };

        let _ = self.nodes[parent.0].children.remove(idx);
        self.detach_links(child);
        self.relink_children(parent);
    }

    /// Remove a node while promoting its children into its place.
    ///
    /// The node's ordered child list is spliced into the parent's child list
    /// at the node's former index, preserving document order — the "unwrap"
    /// operation the cleanser uses to drop a disallowed wrapper element
    /// without losing its content. One structural edit; the tree is
    /// consistent before and after, never in between.
    pub fn unwrap_node(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(idx) = self.child_index(parent, id) else {
            return;
        };

        let promoted = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &promoted {
            self.nodes[child.0].parent = Some(parent);
        }

        // Replace the node with its children in a single splice.
        let _ = self.nodes[parent.0]
            .children
            .splice(idx..=idx, promoted)
            .next();
        self.detach_links(id);
        self.relink_children(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Iterate over all descendants of `id` in document order (preorder,
    /// excluding `id` itself).
    ///
    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Callers that mutate the tree while visiting must snapshot this
    /// iterator into a `Vec` first and process it back-to-front; a removal
    /// never invalidates entries that were discovered before the removed
    /// node.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(id).iter().rev().copied());
        DescendantIterator { tree: self, stack }
    }

    /// Index of `child` within `parent`'s child list.
    fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|&c| c == child)
    }

    /// Clear the parent and sibling links of a detached node.
    fn detach_links(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Recompute the sibling links of all of `parent`'s children from the
    /// child list. Structural edits go through this instead of patching
    /// individual links, trading a little work for an invariant that is easy
    /// to see is maintained.
    fn relink_children(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        let mut prev: Option<NodeId> = None;
        for &child in &children {
            self.nodes[child.0].prev_sibling = prev;
            self.nodes[child.0].next_sibling = None;
            if let Some(p) = prev {
                self.nodes[p.0].next_sibling = Some(child);
            }
            prev = Some(child);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the descendants of a node in document order.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    /// Pending nodes; children are pushed reversed so the leftmost pops first.
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Build a case-insensitive tag-name set: every name is ASCII lower-cased and
/// duplicates collapse. Both sanitizer components normalize their allowed-tag
/// list through this at construction time so no comparison needs to
/// re-normalize.
#[must_use]
pub fn lowercase_tag_set<I, S>(tags: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().to_ascii_lowercase())
        .collect()
}
