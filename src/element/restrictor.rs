use crate::element::element_model::{ElementId, ElementTree};

// ============================================================================
// Include / exclude filtering
// ============================================================================

/// Prune `forest` to the include/exclude view.
///
/// Ids compare against display ids. With an include list, an element that
/// is neither included nor excluded survives only as a private pass-through
/// ancestor of something included.
pub fn restrict<E: AsRef<str>, I: AsRef<str>>(
    tree: &mut ElementTree,
    forest: Vec<ElementId>,
    exclude: &[E],
    include: &[I],
) -> Vec<ElementId> {
    if !include.is_empty() {
        restrict_and_exclude(tree, forest, exclude, include)
    } else if !exclude.is_empty() {
        exclude_recursive(tree, forest, exclude)
    } else {
        forest
    }
}

fn listed<S: AsRef<str>>(ids: &[S], display_id: &str) -> bool {
    ids.iter().any(|x| x.as_ref() == display_id)
}

fn exclude_recursive<E: AsRef<str>>(tree: &mut ElementTree, forest: Vec<ElementId>, exclude: &[E]) -> Vec<ElementId> {
    let mut kept = Vec::with_capacity(forest.len());
    for id in forest {
        if listed(exclude, tree.get(id).display_id()) {
            continue;
        }
        let children = tree.take_children(id);
        let children = exclude_recursive(tree, children, exclude);
        tree.set_children(id, children);
        kept.push(id);
    }
    kept
}

fn restrict_and_exclude<E: AsRef<str>, I: AsRef<str>>(
    tree: &mut ElementTree,
    forest: Vec<ElementId>,
    exclude: &[E],
    include: &[I],
) -> Vec<ElementId> {
    forest
        .into_iter()
        .filter(|&id| restrict_element(tree, id, exclude, include))
        .collect()
}

/// Returns whether `id` survives.
fn restrict_element<E: AsRef<str>, I: AsRef<str>>(
    tree: &mut ElementTree,
    id: ElementId,
    exclude: &[E],
    include: &[I],
) -> bool {
    let (excluded, included) = {
        let display_id = tree.get(id).display_id();
        (listed(exclude, display_id), listed(include, display_id))
    };
    if excluded {
        return false;
    }

    let children = tree.take_children(id);
    if included {
        let children = exclude_recursive(tree, children, exclude);
        tree.set_children(id, children);
        return true;
    }

    let surviving = restrict_and_exclude(tree, children, exclude, include);
    if surviving.is_empty() {
        return false;
    }
    tree.set_children(id, surviving);
    tree.get_mut(id).is_private = true;
    true
}

impl ElementTree {
    pub fn restrict<E: AsRef<str>, I: AsRef<str>>(&mut self, exclude: &[E], include: &[I]) {
        let roots = self.take_roots();
        let roots = restrict(self, roots, exclude, include);
        self.set_roots(roots);
    }
}
