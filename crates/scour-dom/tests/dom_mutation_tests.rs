//! Tests for DOM tree mutation methods: remove_child, insert_before,
//! unwrap_node, and document-order traversal.

use scour_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag.to_string())))
}

/// Helper to create a text node and return its NodeId.
fn alloc_text(tree: &mut DomTree, text: &str) -> NodeId {
    tree.alloc(NodeType::Text(text.to_string()))
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, a);

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_keeps_subtree_intact() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);
    let grandchild = alloc_text(&mut tree, "text");
    tree.append_child(child, grandchild);

    tree.remove_child(parent, child);

    // The detached node keeps its own children
    assert_eq!(tree.children(child), &[grandchild]);
    assert_eq!(tree.parent(grandchild), Some(child));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    // new_child should be first, existing second
    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

// ========== unwrap_node ==========

#[test]
fn test_unwrap_node_promotes_children_in_place() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let wrapper = alloc_element(&mut tree, "span");
    let c = alloc_element(&mut tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, wrapper);
    tree.append_child(parent, c);

    let x = alloc_text(&mut tree, "x");
    let y = alloc_text(&mut tree, "y");
    tree.append_child(wrapper, x);
    tree.append_child(wrapper, y);

    tree.unwrap_node(wrapper);

    // The wrapper's children take its place, order preserved
    assert_eq!(tree.children(parent), &[a, x, y, c]);
    assert_eq!(tree.parent(x), Some(parent));
    assert_eq!(tree.parent(y), Some(parent));

    // Sibling links run a <-> x <-> y <-> c
    assert_eq!(tree.next_sibling(a), Some(x));
    assert_eq!(tree.next_sibling(x), Some(y));
    assert_eq!(tree.next_sibling(y), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(y));

    // The wrapper itself is fully detached
    assert_eq!(tree.parent(wrapper), None);
    assert_eq!(tree.children(wrapper).len(), 0);
    assert_eq!(tree.prev_sibling(wrapper), None);
    assert_eq!(tree.next_sibling(wrapper), None);
}

#[test]
fn test_unwrap_node_with_no_children_just_removes() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let wrapper = alloc_element(&mut tree, "span");
    let c = alloc_element(&mut tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, wrapper);
    tree.append_child(parent, c);

    tree.unwrap_node(wrapper);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_unwrap_node_on_root_is_a_no_op() {
    let mut tree = DomTree::new();
    let child = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, child);

    // The root has no parent to promote into
    tree.unwrap_node(NodeId::ROOT);

    assert_eq!(tree.children(NodeId::ROOT), &[child]);
}

// ========== descendants ==========

#[test]
fn test_descendants_document_order() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);

    let p = alloc_element(&mut tree, "p");
    tree.append_child(div, p);
    let text = alloc_text(&mut tree, "Text");
    tree.append_child(p, text);

    let span = alloc_element(&mut tree, "span");
    tree.append_child(div, span);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![div, p, text, span]);
}

#[test]
fn test_descendants_excludes_the_start_node() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let text = alloc_text(&mut tree, "x");
    tree.append_child(div, text);

    let order: Vec<NodeId> = tree.descendants(div).collect();
    assert_eq!(order, vec![text]);
}

#[test]
fn test_descendants_of_leaf_is_empty() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);

    assert_eq!(tree.descendants(div).count(), 0);
}
