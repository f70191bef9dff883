use crate::element::element_model::{ElementId, ElementTree};

// ============================================================================
// Tree merge
// ============================================================================

/// Merge `addend` into `old`, re-rooting the result under `parent`.
///
/// Elements are matched by display id, one level at a time. A matched
/// element keeps its identity and absorbs the addend's children recursively;
/// unmatched addend elements are appended after the existing ones in addend
/// order. Nothing is ever removed from `old`.
///
/// An addend element whose id repeats an id appended earlier in the same
/// pass is folded into that earlier element rather than dropped.
pub fn merge(
    tree: &mut ElementTree,
    old: Vec<ElementId>,
    addend: Vec<ElementId>,
    parent: Option<ElementId>,
) -> Vec<ElementId> {
    let mut result = old;
    for &id in &result {
        tree.get_mut(id).parent = parent;
    }

    for addend_id in addend {
        let existing = {
            let wanted = tree.get(addend_id).display_id();
            result
                .iter()
                .copied()
                .find(|&r| tree.get(r).display_id() == wanted)
        };

        match existing {
            Some(existing) if existing == addend_id => {}
            Some(existing) => {
                let old_children = tree.take_children(existing);
                let addend_children = tree.take_children(addend_id);
                let merged = merge(tree, old_children, addend_children, Some(existing));
                tree.set_children(existing, merged);
            }
            None => {
                tree.get_mut(addend_id).parent = parent;
                result.push(addend_id);
            }
        }
    }

    result
}

impl ElementTree {
    /// Merge a freshly collected tree into this accumulated one, below
    /// `parent` or at the top level.
    pub fn merge_from(&mut self, addend: ElementTree, parent: Option<ElementId>) {
        let addend_roots = self.adopt(addend);
        match parent {
            Some(parent) => {
                let old = self.take_children(parent);
                let merged = merge(self, old, addend_roots, Some(parent));
                self.set_children(parent, merged);
            }
            None => {
                let old = self.take_roots();
                let merged = merge(self, old, addend_roots, None);
                self.set_roots(merged);
            }
        }
    }
}
