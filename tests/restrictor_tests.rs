use page_object_gen::element::element_model::{ElementSnapshot, ElementTree};

use crate::common::utils::{assert_parents_consistent, el, leaf, tree, NONE};

mod common;

/// `A(C, D(F)), B(E)`
fn sample() -> ElementTree {
    tree(vec![
        el("a", vec![leaf("c"), el("d", vec![leaf("f")])]),
        el("b", vec![leaf("e")]),
    ])
}

fn restricted(exclude: &[&str], include: &[&str]) -> ElementTree {
    let mut t = sample();
    t.restrict(exclude, include);
    assert_parents_consistent(&t);
    t
}

#[test]
fn restrict_empty_forest() {
    let mut t = tree(vec![]);
    t.restrict(&["A"], &["B"]);
    assert!(t.is_empty());
}

#[test]
fn restrict_without_filters_is_identity() {
    assert_eq!(restricted(NONE, NONE).outline(), "A(C, D(F)), B(E)");
}

// =========================================================================
// Include
// =========================================================================

#[test]
fn include_keeps_whole_subtree() {
    assert_eq!(restricted(NONE, &["A"]).outline(), "A(C, D(F))");
}

#[test]
fn include_below_root_keeps_private_ancestor() {
    let t = restricted(NONE, &["E"]);
    assert_eq!(t.outline(), "_B(E)");

    let b = t.roots()[0];
    assert!(t.get(b).is_private());
    assert_eq!(t.get(b).display_id(), "B");
}

#[test]
fn include_keeps_only_included_branch_of_private_ancestor() {
    let t = restricted(NONE, &["D"]);
    assert_eq!(t.outline(), "_A(D(F))");
    assert!(!t.get(t.find("D").unwrap()).is_private());
}

#[test]
fn include_of_sibling_subtrees() {
    assert_eq!(restricted(NONE, &["C", "E"]).outline(), "_A(C), _B(E)");
}

#[test]
fn include_of_unknown_id_drops_everything() {
    assert!(restricted(NONE, &["Missing"]).is_empty());
}

// =========================================================================
// Exclude
// =========================================================================

#[test]
fn exclude_root_drops_its_subtree() {
    assert_eq!(restricted(&["A"], NONE).outline(), "B(E)");
}

#[test]
fn exclude_sibling_root() {
    assert_eq!(restricted(&["B"], NONE).outline(), "A(C, D(F))");
}

#[test]
fn exclude_leaf() {
    assert_eq!(restricted(&["F"], NONE).outline(), "A(C, D), B(E)");
}

#[test]
fn exclude_matches_at_every_depth() {
    let mut t = tree(vec![el("a", vec![leaf("c")]), el("b", vec![leaf("c")])]);
    t.restrict(&["C"], NONE);
    assert_eq!(t.outline(), "A, B");
}

// =========================================================================
// Include and exclude
// =========================================================================

#[test]
fn exclude_applies_inside_included_subtree() {
    assert_eq!(restricted(&["F"], &["A"]).outline(), "A(C, D)");
}

#[test]
fn exclude_wins_over_include() {
    assert!(restricted(&["A"], &["A"]).outline().is_empty());
}

#[test]
fn exclude_prunes_private_path_to_include() {
    assert!(restricted(&["D"], &["F"]).is_empty());
}

#[test]
fn filters_compare_display_ids() {
    let snapshot = vec![ElementSnapshot::new(
        "search-box",
        "div",
        vec![ElementSnapshot::new("submit-button", "button", vec![])],
    )];

    let mut by_raw = ElementTree::from_snapshot(&snapshot);
    by_raw.restrict(&["search-box"], NONE);
    assert_eq!(by_raw.outline(), "SearchBox(SubmitButton)");

    let mut by_display = ElementTree::from_snapshot(&snapshot);
    by_display.restrict(NONE, &["SubmitButton"]);
    assert_eq!(by_display.outline(), "_SearchBox(SubmitButton)");
}
