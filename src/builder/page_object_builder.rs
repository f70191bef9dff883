use std::path::PathBuf;

use tracing::{debug, info};

use crate::builder::fabrication::{ChildPage, GenerationInstruction, PageObjectInFabrication};
use crate::builder::paths::{import_path, page_object_paths};
use crate::codegen::fingerprint::source_fingerprint;
use crate::codegen::page_object::{ChildPageRef, GenerateParams, PageObjectGenerator};
use crate::codegen::queued::QueuedCodeBuilder;
use crate::codegen::snippets::CustomSnippets;
use crate::conflict::resolver::ResolutionReport;
use crate::element::element_model::{ElementSnapshot, ElementTree};
use crate::error::GenerationError;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::GenerationEvent;

// ============================================================================
// Builder options
// ============================================================================

#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Indentation unit of the generated code.
    pub tab: String,

    /// Root below which `page-objects/` is laid out.
    pub e2e_test_path: PathBuf,

    /// Look elements up through the page object's own browser instance.
    pub custom_browser: bool,

    /// JSONL file receiving one [`GenerationEvent`] per operation.
    pub trace_file: Option<PathBuf>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            tab: "  ".to_string(),
            e2e_test_path: PathBuf::from("e2e"),
            custom_browser: false,
            trace_file: None,
        }
    }
}

// ============================================================================
// Page-object builder
// ============================================================================

/// State of a page object about to be rendered.
struct Draft {
    name: String,
    instruction: GenerationInstruction,
    tree: ElementTree,
    child_pages: Vec<ChildPage>,
    route: Option<String>,
    has_fill_form: bool,
    history_uid: u64,
}

/// Runs the element pipeline (restrict, merge, collapse, resolve) on caller
/// supplied snapshots and renders the resulting page objects.
///
/// Operations are sequential; each returns a new [`PageObjectInFabrication`]
/// and leaves its scope untouched.
#[derive(Debug)]
pub struct PageObjectBuilder {
    options: BuilderOptions,
    snippets: CustomSnippets,
    code: QueuedCodeBuilder,
    tracer: TraceLogger,
    next_history_uid: u64,
}

impl PageObjectBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        let tracer = match &options.trace_file {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };
        Self {
            code: QueuedCodeBuilder::new(options.tab.as_str()),
            snippets: CustomSnippets::default(),
            options,
            tracer,
            next_history_uid: 0,
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Replace the snippet rules used by every following render.
    pub fn with_snippets(mut self, snippets: CustomSnippets) -> Self {
        self.snippets = snippets;
        self
    }

    /// Snippet rules, starting from [`CustomSnippets::default`]. Register
    /// additional rules here before generating.
    pub fn snippets_mut(&mut self) -> &mut CustomSnippets {
        &mut self.snippets
    }

    /// Build a new page object from `snapshot`.
    pub fn generate(
        &mut self,
        instruction: GenerationInstruction,
        snapshot: &[ElementSnapshot],
    ) -> Result<PageObjectInFabrication, GenerationError> {
        let name = required_name(&instruction)?;
        let history_uid = self.advance_history();

        let mut tree = ElementTree::from_snapshot(snapshot);
        tree.restrict(&instruction.exclude, &instruction.include);
        let report = settle(&mut tree)?;

        let draft = Draft {
            name,
            instruction,
            tree,
            child_pages: Vec::new(),
            route: None,
            has_fill_form: false,
            history_uid,
        };
        Ok(self.render(draft, "generate", Some(&report)))
    }

    /// Merge the elements of `snapshot` into `scope`.
    pub fn append(
        &mut self,
        mut instruction: GenerationInstruction,
        snapshot: &[ElementSnapshot],
        scope: &PageObjectInFabrication,
    ) -> Result<PageObjectInFabrication, GenerationError> {
        if instruction.path.is_none() {
            instruction.path = scope.instruction.path.clone();
        }
        let history_uid = self.advance_history();

        let mut addend = ElementTree::from_snapshot(snapshot);
        addend.restrict(&instruction.exclude, &instruction.include);

        let mut tree = scope.tree.clone();
        tree.merge_from(addend, None);
        let report = settle(&mut tree)?;

        let draft = Draft {
            name: scope.name.clone(),
            instruction,
            tree,
            child_pages: scope.child_pages.clone(),
            route: scope.route.clone(),
            has_fill_form: scope.has_fill_form,
            history_uid,
        };
        Ok(self.render(draft, "append", Some(&report)))
    }

    /// Generate a page object from `snapshot` and compose it into `scope` as
    /// a child page. Returns the re-rendered parent.
    pub fn append_child(
        &mut self,
        instruction: GenerationInstruction,
        snapshot: &[ElementSnapshot],
        scope: &PageObjectInFabrication,
    ) -> Result<PageObjectInFabrication, GenerationError> {
        let name = required_name(&instruction)?;
        let child = self.generate(instruction, snapshot)?;

        let mut child_pages = scope.child_pages.clone();
        child_pages.push(ChildPage {
            name,
            page_object: child,
        });

        let draft = Draft {
            child_pages,
            ..Draft::rerender(scope)
        };
        Ok(self.render(draft, "append_child", None))
    }

    /// Add a `route` member and a `navigateTo` method to `scope`.
    pub fn add_navigate_to(&mut self, scope: &PageObjectInFabrication, route: &str) -> PageObjectInFabrication {
        let draft = Draft {
            route: Some(route.to_string()),
            ..Draft::rerender(scope)
        };
        self.render(draft, "add_navigate_to", None)
    }

    /// Add `fillForm` and `clearForm` methods covering the inputs of `scope`.
    pub fn add_fill_form(&mut self, scope: &PageObjectInFabrication) -> PageObjectInFabrication {
        let draft = Draft {
            has_fill_form: true,
            ..Draft::rerender(scope)
        };
        self.render(draft, "add_fill_form", None)
    }

    fn advance_history(&mut self) -> u64 {
        let uid = self.next_history_uid;
        self.next_history_uid += 1;
        uid
    }

    fn render(&mut self, draft: Draft, operation: &str, report: Option<&ResolutionReport>) -> PageObjectInFabrication {
        let paths = page_object_paths(
            &self.options.e2e_test_path,
            &draft.name,
            draft.instruction.path.as_deref(),
        );

        let child_refs: Vec<ChildPageRef> = draft
            .child_pages
            .iter()
            .map(|child| ChildPageRef {
                name: child.name.clone(),
                import_path: import_path(&paths.generated, &child.page_object.paths.extending),
            })
            .collect();

        let generated_source = PageObjectGenerator::generate(
            &mut self.code,
            &GenerateParams {
                page_name: &draft.name,
                tree: &draft.tree,
                child_pages: &child_refs,
                route: draft.route.as_deref(),
                has_fill_form: draft.has_fill_form,
                custom_browser: self.options.custom_browser,
                snippets: &self.snippets,
            },
        );
        let extending_source = PageObjectGenerator::generate_extending(
            &mut self.code,
            &draft.name,
            &import_path(&paths.extending, &paths.generated),
        );
        let fingerprint = source_fingerprint(&generated_source);

        let mut event = GenerationEvent::now(draft.history_uid, operation, &draft.name)
            .with_elements(draft.tree.len())
            .with_fingerprint(&fingerprint);
        if let Some(report) = report {
            event = event.with_resolution(report);
        }
        self.tracer.log(&event);

        info!(page = %draft.name, operation, "page object rendered");
        debug!(tree = %draft.tree.outline(), "element tree");

        PageObjectInFabrication {
            name: draft.name,
            instruction: draft.instruction,
            tree: draft.tree,
            child_pages: draft.child_pages,
            route: draft.route,
            has_fill_form: draft.has_fill_form,
            history_uid: draft.history_uid,
            paths,
            generated_source,
            extending_source,
            fingerprint,
        }
    }
}

impl Draft {
    fn rerender(scope: &PageObjectInFabrication) -> Self {
        Self {
            name: scope.name.clone(),
            instruction: scope.instruction.rerender(),
            tree: scope.tree.clone(),
            child_pages: scope.child_pages.clone(),
            route: scope.route.clone(),
            has_fill_form: scope.has_fill_form,
            history_uid: scope.history_uid,
        }
    }
}

fn required_name(instruction: &GenerationInstruction) -> Result<String, GenerationError> {
    match instruction.name.as_deref() {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(GenerationError::MissingName),
    }
}

/// Collapse array duplicates, resolve names and drop unreachable slots.
fn settle(tree: &mut ElementTree) -> Result<ResolutionReport, GenerationError> {
    tree.collapse_duplicates();
    let report = tree.resolve_conflicts()?;
    tree.compact();
    debug!(
        conflict_buckets = report.conflict_buckets,
        renamed = report.renamed,
        "element tree settled"
    );
    Ok(report)
}
