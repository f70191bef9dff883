#![allow(dead_code)]

use page_object_gen::element::element_model::{ElementSnapshot, ElementTree};

pub const NONE: &[&str] = &[];

/// `DIV` element with children.
pub fn el(id: &str, children: Vec<ElementSnapshot>) -> ElementSnapshot {
    ElementSnapshot::new(id, "div", children)
}

pub fn leaf(id: &str) -> ElementSnapshot {
    el(id, vec![])
}

pub fn input(id: &str) -> ElementSnapshot {
    ElementSnapshot::new(id, "input", vec![])
}

pub fn tree(snapshot: Vec<ElementSnapshot>) -> ElementTree {
    ElementTree::from_snapshot(&snapshot)
}

/// Every reachable element's parent must be its actual container.
pub fn assert_parents_consistent(tree: &ElementTree) {
    for &root in tree.roots() {
        assert_eq!(
            tree.get(root).parent(),
            None,
            "root {} has a parent",
            tree.get(root).display_id()
        );
    }
    for id in tree.flat() {
        for &child in tree.get(id).children() {
            assert_eq!(
                tree.get(child).parent(),
                Some(id),
                "{} is listed under {} but points elsewhere",
                tree.get(child).display_id(),
                tree.get(id).display_id()
            );
        }
    }
}
