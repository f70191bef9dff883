use crate::builder::paths::PageObjectPaths;
use crate::element::element_model::ElementTree;

// ============================================================================
// Generation instruction
// ============================================================================

/// Describes how one page object is produced from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationInstruction {
    /// Class name of the page object. Required by `generate` and
    /// `append_child`.
    pub name: Option<String>,

    /// Display ids dropped together with their subtrees.
    pub exclude: Vec<String>,

    /// Display ids to keep; when non-empty everything else becomes a private
    /// pass-through or is dropped.
    pub include: Vec<String>,

    /// Sub-directory below the page-object roots.
    pub path: Option<String>,

    /// Virtual page objects are built but never written.
    pub is_virtual: bool,
}

impl GenerationInstruction {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_exclude<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.exclude.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_include<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.include.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Instruction used when re-rendering an existing page object: same
    /// identity, no new include filter.
    pub fn rerender(&self) -> Self {
        Self {
            name: self.name.clone(),
            exclude: self.exclude.clone(),
            include: Vec::new(),
            path: self.path.clone(),
            is_virtual: self.is_virtual,
        }
    }
}

// ============================================================================
// Page object in fabrication
// ============================================================================

#[derive(Debug, Clone)]
pub struct ChildPage {
    pub name: String,
    pub page_object: PageObjectInFabrication,
}

/// A page object as produced by the latest builder operation. Every builder
/// operation takes one of these as its scope and returns a new one.
#[derive(Debug, Clone)]
pub struct PageObjectInFabrication {
    pub name: String,
    pub instruction: GenerationInstruction,

    /// Accumulated, collapsed and conflict-resolved element tree.
    pub tree: ElementTree,

    pub child_pages: Vec<ChildPage>,
    pub route: Option<String>,
    pub has_fill_form: bool,

    /// Builder history step that last consumed a snapshot for this object.
    pub history_uid: u64,

    pub paths: PageObjectPaths,
    pub generated_source: String,
    pub extending_source: String,

    /// SHA-1 of `generated_source`.
    pub fingerprint: String,
}

impl PageObjectInFabrication {
    pub fn child(&self, name: &str) -> Option<&PageObjectInFabrication> {
        self.child_pages
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.page_object)
    }
}
