use page_object_gen::element::element_model::ElementTree;
use page_object_gen::element::merge::merge;

use crate::common::utils::{assert_parents_consistent, el, leaf, tree};

mod common;

fn merged(old: ElementTree, addend: ElementTree) -> ElementTree {
    let mut result = old;
    result.merge_from(addend, None);
    assert_parents_consistent(&result);
    result
}

// =========================================================================
// Level-wise merge
// =========================================================================

#[test]
fn merge_of_empty_forests_is_empty() {
    let result = merged(tree(vec![]), tree(vec![]));
    assert!(result.is_empty());
}

#[test]
fn merge_appends_adjacent_elements() {
    let result = merged(tree(vec![leaf("a")]), tree(vec![leaf("b")]));
    assert_eq!(result.outline(), "A, B");
}

#[test]
fn merge_appends_adjacent_elements_with_children() {
    let result = merged(
        tree(vec![el("c", vec![leaf("a")])]),
        tree(vec![el("d", vec![leaf("b")])]),
    );
    assert_eq!(result.outline(), "C(A), D(B)");
}

#[test]
fn merge_keeps_existing_element_on_overlap() {
    let old = tree(vec![leaf("a")]);
    let old_root = old.roots()[0];

    let result = merged(old, tree(vec![leaf("a")]));
    assert_eq!(result.outline(), "A");
    assert_eq!(result.roots(), &[old_root]);
}

#[test]
fn merge_extends_children_of_matched_element() {
    let old = tree(vec![leaf("a")]);
    let old_root = old.roots()[0];

    let result = merged(old, tree(vec![el("a", vec![leaf("b")])]));
    assert_eq!(result.outline(), "A(B)");
    assert_eq!(result.roots()[0], old_root, "existing A survives");

    let b = result.find("B").expect("B merged in");
    assert_eq!(result.get(b).parent(), Some(old_root));
}

#[test]
fn merge_unions_children_in_first_seen_order() {
    let result = merged(
        tree(vec![el("d", vec![leaf("a")])]),
        tree(vec![el("d", vec![leaf("b")])]),
    );
    assert_eq!(result.outline(), "D(A, B)");
}

#[test]
fn merge_recurses_three_levels_overlapping() {
    let result = merged(
        tree(vec![el("e", vec![el("d", vec![leaf("a")])])]),
        tree(vec![el("e", vec![el("d", vec![leaf("a"), leaf("b")])])]),
    );
    assert_eq!(result.outline(), "E(D(A, B))");
}

#[test]
fn merge_does_not_match_across_levels() {
    let result = merged(
        tree(vec![el("e", vec![el("d", vec![leaf("a")])])]),
        tree(vec![el("f", vec![el("d", vec![leaf("b")])])]),
    );
    assert_eq!(result.outline(), "E(D(A)), F(D(B))");
}

#[test]
fn merge_folds_repeated_addend_ids_into_first() {
    let result = merged(
        tree(vec![]),
        tree(vec![el("row[]", vec![leaf("b")]), el("row[]", vec![leaf("c")])]),
    );
    assert_eq!(result.outline(), "Row[](B, C)");
}

#[test]
fn merge_below_parent_attaches_to_that_parent() {
    let mut accumulated = tree(vec![el("form", vec![leaf("name")]), leaf("footer")]);
    let form = accumulated.find("Form").unwrap();

    accumulated.merge_from(tree(vec![leaf("name"), leaf("email")]), Some(form));
    assert_eq!(accumulated.outline(), "Form(Name, Email), Footer");
    assert_parents_consistent(&accumulated);
}

// =========================================================================
// Re-rooting and algebraic properties
// =========================================================================

#[test]
fn merge_with_empty_addend_only_reparents() {
    let mut t = tree(vec![leaf("p"), el("q", vec![leaf("x"), leaf("y")])]);
    let p = t.find("P").unwrap();
    let q = t.find("Q").unwrap();
    let forest = t.get(q).children().to_vec();

    let result = merge(&mut t, forest.clone(), vec![], Some(p));
    assert_eq!(result, forest);
    for id in result {
        assert_eq!(t.get(id).parent(), Some(p));
    }
}

#[test]
fn merge_is_associative_for_disjoint_ids() {
    let a = || tree(vec![el("a", vec![leaf("x")])]);
    let b = || tree(vec![leaf("b")]);
    let c = || tree(vec![el("c", vec![leaf("y")])]);

    let left = merged(merged(a(), b()), c());
    let right = merged(a(), merged(b(), c()));

    assert_eq!(left.outline(), right.outline());
    assert_eq!(left.outline(), "A(X), B, C(Y)");
}

#[test]
fn merge_never_removes_existing_elements() {
    let result = merged(
        tree(vec![el("a", vec![leaf("b"), leaf("c")]), leaf("d")]),
        tree(vec![el("a", vec![leaf("c")])]),
    );
    assert_eq!(result.outline(), "A(B, C), D");
    assert_eq!(result.len(), 4);
}
