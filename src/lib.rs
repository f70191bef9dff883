//! Page-object generation from UI element snapshots.
//!
//! A snapshot is a tree of `{id, type, children}` elements tagged in the
//! page under test. The pipeline restricts it to an include/exclude view,
//! merges it into an accumulated [`ElementTree`](element::element_model::ElementTree),
//! collapses duplicate list items, gives colliding ids compound names and
//! finally renders TypeScript page objects through a deferred
//! [`QueuedCodeBuilder`](codegen::queued::QueuedCodeBuilder).

use crate::{
    element::element_model::{ElementSnapshot, ElementTree},
    error::GenerationError,
};

pub mod builder;
pub mod cli;
pub mod codegen;
pub mod conflict;
pub mod element;
pub mod error;
pub mod trace;

/// Merge `snapshot` into `accumulated` and settle the result: collapse
/// duplicate array elements, then resolve name conflicts.
pub fn absorb_snapshot(accumulated: &mut ElementTree, snapshot: &[ElementSnapshot]) -> Result<(), GenerationError> {
    accumulated.merge_from(ElementTree::from_snapshot(snapshot), None);
    accumulated.collapse_duplicates();
    accumulated.resolve_conflicts()?;
    Ok(())
}
