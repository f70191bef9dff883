use serde::{Deserialize, Serialize};

use crate::element::case::kebab_to_pascal;

/// Suffix marking a repeatable, list-like element (`ResultRow[]`).
pub const ARRAY_MARKER: &str = "[]";

/// Prefix of the exposed name of a pass-through element kept only for its
/// included descendants.
pub const PRIVATE_PREFIX: &str = "_";

// ============================================================================
// Snapshot (input boundary)
// ============================================================================

/// One element as reported by the collector running in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: String,

    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default)]
    pub children: Vec<ElementSnapshot>,
}

impl ElementSnapshot {
    pub fn new(id: impl Into<String>, element_type: impl Into<String>, children: Vec<ElementSnapshot>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            children,
        }
    }
}

// ============================================================================
// Element
// ============================================================================

/// Index of an element inside its owning [`ElementTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    raw_id: String,
    display_id: String,
    element_type: String,

    /// Compound name set by the conflict resolver.
    pub(crate) resolved_id: Option<String>,
    pub(crate) is_private: bool,

    pub(crate) children: Vec<ElementId>,
    pub(crate) parent: Option<ElementId>,
}

impl Element {
    fn new(raw_id: &str, element_type: &str, parent: Option<ElementId>) -> Self {
        Self {
            raw_id: raw_id.to_string(),
            display_id: kebab_to_pascal(raw_id),
            element_type: element_type.to_uppercase(),
            resolved_id: None,
            is_private: false,
            children: Vec::new(),
            parent,
        }
    }

    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    /// Display id without the array marker.
    pub fn pure_id(&self) -> &str {
        strip_array_marker(&self.display_id)
    }

    pub fn is_array(&self) -> bool {
        is_array_id(&self.display_id)
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Globally unique name: the resolver's compound name or the display
    /// id, prefixed with [`PRIVATE_PREFIX`] for pass-through elements.
    pub fn conflict_free_id(&self) -> String {
        let base = self.resolved_id.as_deref().unwrap_or(&self.display_id);
        if self.is_private {
            format!("{PRIVATE_PREFIX}{base}")
        } else {
            base.to_string()
        }
    }

    /// [`conflict_free_id`](Self::conflict_free_id) without the array
    /// marker, usable as part of a generated identifier: `_Rows`, `AC`.
    pub fn exposed_name(&self) -> String {
        let base = strip_array_marker(self.resolved_id.as_deref().unwrap_or(&self.display_id));
        if self.is_private {
            format!("{PRIVATE_PREFIX}{base}")
        } else {
            base.to_string()
        }
    }
}

/// Matches `^[A-Z][a-zA-Z0-9]*\[\]$`.
pub fn is_array_id(display_id: &str) -> bool {
    let Some(stem) = display_id.strip_suffix(ARRAY_MARKER) else {
        return false;
    };
    let mut chars = stem.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

pub fn strip_array_marker(id: &str) -> &str {
    if is_array_id(id) {
        &id[..id.len() - ARRAY_MARKER.len()]
    } else {
        id
    }
}

// ============================================================================
// ElementTree (arena)
// ============================================================================

/// Arena holding every element of an accumulated forest.
///
/// Elements dropped by the restrictor or the duplicate collapse stay in the
/// arena but are no longer reachable from [`roots`](Self::roots);
/// [`compact`](Self::compact) reclaims them.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<Element>,
    roots: Vec<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a collector snapshot, wiring parents top-down.
    pub fn from_snapshot(snapshot: &[ElementSnapshot]) -> Self {
        let mut tree = Self::new();
        let roots = snapshot
            .iter()
            .map(|s| tree.insert_snapshot(s, None))
            .collect();
        tree.roots = roots;
        tree
    }

    fn insert_snapshot(&mut self, snapshot: &ElementSnapshot, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes
            .push(Element::new(&snapshot.id, &snapshot.element_type, parent));

        let children: Vec<ElementId> = snapshot
            .children
            .iter()
            .map(|child| self.insert_snapshot(child, Some(id)))
            .collect();
        self.nodes[id.0].children = children;
        id
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub(crate) fn take_roots(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.roots)
    }

    pub(crate) fn set_roots(&mut self, roots: Vec<ElementId>) {
        self.roots = roots;
    }

    pub(crate) fn take_children(&mut self, id: ElementId) -> Vec<ElementId> {
        std::mem::take(&mut self.nodes[id.0].children)
    }

    pub(crate) fn set_children(&mut self, id: ElementId, children: Vec<ElementId>) {
        self.nodes[id.0].children = children;
    }

    /// Panics if `id` was issued by another tree.
    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of reachable elements.
    pub fn len(&self) -> usize {
        self.flat().len()
    }

    /// Number of arena slots, reachable or not.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Every reachable element, depth-first pre-order.
    pub fn flat(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.flat_into(&self.roots, &mut out);
        out
    }

    fn flat_into(&self, layer: &[ElementId], out: &mut Vec<ElementId>) {
        for &id in layer {
            out.push(id);
            self.flat_into(&self.nodes[id.0].children, out);
        }
    }

    /// The element followed by its ancestors, leaf first.
    pub fn ancestor_chain(&self, id: ElementId) -> Vec<ElementId> {
        let mut chain = vec![id];
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.nodes[parent.0].parent;
        }
        chain
    }

    /// Human-readable location, e.g. `Form > Address > Street`.
    pub fn path_of(&self, id: ElementId) -> String {
        self.ancestor_chain(id)
            .iter()
            .rev()
            .map(|&a| self.nodes[a.0].display_id.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// First reachable element (pre-order) with the given display id.
    pub fn find(&self, display_id: &str) -> Option<ElementId> {
        self.flat()
            .into_iter()
            .find(|&id| self.nodes[id.0].display_id == display_id)
    }

    pub fn find_all(&self, display_id: &str) -> Vec<ElementId> {
        self.flat()
            .into_iter()
            .filter(|&id| self.nodes[id.0].display_id == display_id)
            .collect()
    }

    /// Export the reachable forest back to collector form.
    pub fn to_snapshot(&self) -> Vec<ElementSnapshot> {
        self.roots.iter().map(|&id| self.snapshot_of(id)).collect()
    }

    fn snapshot_of(&self, id: ElementId) -> ElementSnapshot {
        let node = &self.nodes[id.0];
        ElementSnapshot {
            id: node.raw_id.clone(),
            element_type: node.element_type.clone(),
            children: node.children.iter().map(|&c| self.snapshot_of(c)).collect(),
        }
    }

    /// One-line outline of the forest by conflict-free id:
    /// `A(C, D(F)), _B(E)`.
    pub fn outline(&self) -> String {
        self.outline_layer(&self.roots)
    }

    fn outline_layer(&self, layer: &[ElementId]) -> String {
        layer
            .iter()
            .map(|&id| {
                let node = &self.nodes[id.0];
                if node.children.is_empty() {
                    node.conflict_free_id()
                } else {
                    format!("{}({})", node.conflict_free_id(), self.outline_layer(&node.children))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Move every element of `other` into this arena. Returns `other`'s roots
    /// re-indexed; they are not attached anywhere yet.
    pub(crate) fn adopt(&mut self, other: ElementTree) -> Vec<ElementId> {
        let offset = self.nodes.len();
        let shift = |id: ElementId| ElementId(id.0 + offset);

        for mut node in other.nodes {
            node.parent = node.parent.map(shift);
            node.children = node.children.into_iter().map(shift).collect();
            self.nodes.push(node);
        }

        other.roots.into_iter().map(shift).collect()
    }

    /// Drop unreachable arena slots, renumbering the survivors in pre-order.
    /// Invalidates every previously issued [`ElementId`].
    pub fn compact(&mut self) {
        let order = self.flat();
        let mut remap = vec![None; self.nodes.len()];
        for (new_index, id) in order.iter().enumerate() {
            remap[id.0] = Some(ElementId(new_index));
        }
        let relocate = |id: ElementId| remap[id.0];

        let mut nodes = Vec::with_capacity(order.len());
        for id in &order {
            let mut node = self.nodes[id.0].clone();
            node.parent = node.parent.and_then(relocate);
            node.children = node.children.iter().filter_map(|&c| relocate(c)).collect();
            nodes.push(node);
        }

        self.roots = self.roots.iter().filter_map(|&r| relocate(r)).collect();
        self.nodes = nodes;
    }

    pub(crate) fn clear_resolutions(&mut self) {
        for node in &mut self.nodes {
            node.resolved_id = None;
        }
    }
}
