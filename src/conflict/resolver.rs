use std::collections::BTreeMap;

use crate::element::element_model::{ElementId, ElementTree};
use crate::error::ConflictError;

// ============================================================================
// Conflict resolution
// ============================================================================

/// Outcome of a successful resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Display ids shared by more than one element.
    pub conflict_buckets: usize,

    /// Elements that received a compound name.
    pub renamed: usize,
}

/// Ancestor chain of one conflicting element, leaf first, with the
/// conflict-root marks collected from every pairwise comparison.
#[derive(Debug)]
struct ConflictPath {
    element: ElementId,
    steps: Vec<ElementId>,
    marked: Vec<bool>,
}

impl ConflictPath {
    fn resolve(tree: &ElementTree, element: ElementId) -> Self {
        let steps = tree.ancestor_chain(element);
        let mut marked = vec![false; steps.len()];
        // an element always anchors its own name
        marked[0] = true;
        Self {
            element,
            steps,
            marked,
        }
    }

    /// Pure ids of the marked steps, outermost first.
    fn compound_id(&self, tree: &ElementTree) -> String {
        self.steps
            .iter()
            .zip(&self.marked)
            .rev()
            .filter(|(_, marked)| **marked)
            .map(|(&step, _)| tree.get(step).pure_id())
            .collect()
    }
}

/// Give every element whose display id occurs more than once in the forest
/// a compound name built from the ancestors where its chain diverges from
/// each other member of its bucket.
///
/// Previous resolutions are cleared first. On error nothing is renamed.
pub fn resolve_conflicts(tree: &mut ElementTree) -> Result<ResolutionReport, ConflictError> {
    let buckets = build_buckets(tree);
    let mut report = ResolutionReport::default();
    let mut assignments = Vec::new();

    for members in buckets.values().filter(|members| members.len() > 1) {
        report.conflict_buckets += 1;

        let mut paths: Vec<ConflictPath> = members
            .iter()
            .map(|&m| ConflictPath::resolve(tree, m))
            .collect();

        // marking is symmetric, so each unordered pair is visited once
        for x in 0..paths.len() {
            for y in (x + 1)..paths.len() {
                mark_divergence(tree, &mut paths, x, y)?;
            }
        }

        for path in &paths {
            assignments.push((path.element, path.compound_id(tree)));
        }
    }

    tree.clear_resolutions();
    for (element, name) in assignments {
        tree.get_mut(element).resolved_id = Some(name);
        report.renamed += 1;
    }

    Ok(report)
}

/// Display id -> elements carrying it, in depth-first order.
fn build_buckets(tree: &ElementTree) -> BTreeMap<String, Vec<ElementId>> {
    let mut buckets: BTreeMap<String, Vec<ElementId>> = BTreeMap::new();
    for id in tree.flat() {
        buckets
            .entry(tree.get(id).display_id().to_string())
            .or_default()
            .push(id);
    }
    buckets
}

/// Walk both chains from the root end and mark the first pair of
/// differing ancestors.
fn mark_divergence(
    tree: &ElementTree,
    paths: &mut [ConflictPath],
    x: usize,
    y: usize,
) -> Result<(), ConflictError> {
    let len_x = paths[x].steps.len();
    let len_y = paths[y].steps.len();

    let divergence = paths[x]
        .steps
        .iter()
        .rev()
        .zip(paths[y].steps.iter().rev())
        .position(|(a, b)| a != b);

    match divergence {
        Some(offset) => {
            paths[x].marked[len_x - 1 - offset] = true;
            paths[y].marked[len_y - 1 - offset] = true;
            Ok(())
        }
        None => {
            let (ancestor, descendant) = if len_x <= len_y {
                (paths[x].element, paths[y].element)
            } else {
                (paths[y].element, paths[x].element)
            };
            Err(ConflictError::AncestorConflict {
                ancestor: tree.path_of(ancestor),
                descendant: tree.path_of(descendant),
            })
        }
    }
}

impl ElementTree {
    pub fn resolve_conflicts(&mut self) -> Result<ResolutionReport, ConflictError> {
        resolve_conflicts(self)
    }
}
