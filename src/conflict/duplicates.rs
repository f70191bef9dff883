use crate::element::element_model::{ElementId, ElementTree};
use crate::element::merge::merge;

// ============================================================================
// Duplicate array-element collapse
// ============================================================================

/// Collapse same-level siblings that share an array-tagged display id into
/// the first of them, unioning their children with [`merge`].
///
/// Repeated list items within one snapshot produce such siblings. Equal
/// non-array siblings are left to the conflict resolver.
pub fn collapse_duplicates(tree: &mut ElementTree, forest: &mut Vec<ElementId>) {
    let mut i = 0;
    while i < forest.len() {
        if tree.get(forest[i]).is_array() {
            while let Some(duplicate) = find_duplicate(tree, forest, i) {
                let survivor = forest[i];
                let old = tree.take_children(survivor);
                let addend = tree.take_children(forest[duplicate]);
                let merged = merge(tree, old, addend, Some(survivor));
                tree.set_children(survivor, merged);
                // duplicates always sit after the survivor
                forest.remove(duplicate);
            }
        }
        i += 1;
    }

    for &id in forest.iter() {
        let mut children = tree.take_children(id);
        collapse_duplicates(tree, &mut children);
        tree.set_children(id, children);
    }
}

fn find_duplicate(tree: &ElementTree, forest: &[ElementId], i: usize) -> Option<usize> {
    let wanted = tree.get(forest[i]).display_id();
    forest
        .iter()
        .enumerate()
        .position(|(j, &id)| j != i && tree.get(id).display_id() == wanted)
}

impl ElementTree {
    pub fn collapse_duplicates(&mut self) {
        let mut roots = self.take_roots();
        collapse_duplicates(self, &mut roots);
        self.set_roots(roots);
    }
}
