use std::collections::HashMap;

use tracing::{debug, warn};

use crate::codegen::queued::{DeferredFlag, DeferredText, QueuedCodeBuilder};
use crate::codegen::snippets::{CustomSnippets, SnippetContext, SnippetTarget};
use crate::element::case::first_to_lower;
use crate::element::element_model::{Element, ElementId, ElementTree};

const PROTRACTOR: &str = "protractor";

// ============================================================================
// Generator inputs
// ============================================================================

/// A child page object composed into the generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPageRef {
    /// Class name of the child's extending page object.
    pub name: String,

    /// Module path of the child's extending file, relative to the generated
    /// file of the parent.
    pub import_path: String,
}

#[derive(Debug, Clone)]
pub struct GenerateParams<'a> {
    pub page_name: &'a str,
    pub tree: &'a ElementTree,
    pub child_pages: &'a [ChildPageRef],
    pub route: Option<&'a str>,
    pub has_fill_form: bool,
    /// Route element lookups through `this.browser` instead of the global
    /// `element`.
    pub custom_browser: bool,
    pub snippets: &'a CustomSnippets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

/// Signature of a generated element getter; children extend their parent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetterFunction {
    pub name: String,
    pub parameters: Vec<Parameter>,

    /// Finder expression the CSS locator is passed to:
    /// `this.getRows().get(rowsIndex).element`.
    pub selector_source: String,
}

impl GetterFunction {
    /// `this.getTitle(rowsIndex)`
    pub fn call(&self) -> String {
        format!("this.{}({})", self.name, self.argument_list())
    }

    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn argument_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Generated page object
// ============================================================================

/// Renders `Generated<Name>` page-object classes from a resolved element
/// tree, and the extending `<Name>` classes users edit by hand.
pub struct PageObjectGenerator;

impl PageObjectGenerator {
    pub fn generate(code: &mut QueuedCodeBuilder, params: &GenerateParams<'_>) -> String {
        code.reset().add_import("by", PROTRACTOR);

        let getter_count = DeferredText::new();
        let skipped_array_inputs = DeferredFlag::new();

        add_imports(code, params);
        add_file_info_comment(code, &getter_count, &skipped_array_inputs);

        code.add_line("")
            .add_line(format!("export class Generated{} {{", params.page_name))
            .increase_depth();

        add_public_members(code, params.child_pages);
        code.add_line("");
        add_constructor(code, params.child_pages);
        add_route(code, params.route);
        code.add_line("");

        let getters = add_getter_methods(code, params);
        getter_count.set(format!(
            " * Exposed getters: {}",
            params
                .tree
                .flat()
                .iter()
                .filter(|&&id| !params.tree.get(id).is_private())
                .count()
        ));

        code.add_line("");
        code.add_conditional_line(
            "navigateTo = () => this.browser.get(this.route);",
            params.route.is_some(),
        );
        if params.has_fill_form {
            add_fill_form(code, params, &getters, &skipped_array_inputs);
        }

        code.decrease_depth().add_line("}");

        debug!(
            page = params.page_name,
            getters = getters.len(),
            "rendered generated page object"
        );
        code.result()
    }

    pub fn generate_extending(code: &mut QueuedCodeBuilder, page_name: &str, generated_import_path: &str) -> String {
        code.reset()
            .add_line(format!(
                "import {{ Generated{page_name} }} from '{generated_import_path}';"
            ))
            .add_line(format!("export class {page_name} extends Generated{page_name} {{"))
            .add_line("}");
        code.result()
    }
}

fn add_imports(code: &mut QueuedCodeBuilder, params: &GenerateParams<'_>) {
    code.add_import_statements();
    for child in params.child_pages {
        code.add_import(&child.name, &child.import_path);
    }
}

fn add_file_info_comment(code: &mut QueuedCodeBuilder, getter_count: &DeferredText, skipped: &DeferredFlag) {
    code.add_line("/**")
        .add_line(" * This Page Object was generated automatically.")
        .add_line(" * Do not change this file, changes may be overwritten.")
        .add_line(" * If you want to extend the functionality of this Page object use the extending page-objects in the parent folder.")
        .add_dynamic_line(getter_count)
        .add_dynamic_conditional_line(
            " * Array-like inputs are not covered by fillForm and clearForm.",
            skipped,
        )
        .add_line(" */");
}

fn add_public_members(code: &mut QueuedCodeBuilder, child_pages: &[ChildPageRef]) {
    for child in child_pages {
        code.add_line(format!("public {}: {};", first_to_lower(&child.name), child.name));
    }
}

fn add_constructor(code: &mut QueuedCodeBuilder, child_pages: &[ChildPageRef]) {
    code.add_line("constructor(")
        .increase_depth()
        .add_import("ProtractorBrowser", PROTRACTOR)
        .add_import_as("browser", PROTRACTOR, "_browser")
        .add_line("private customBrowser?: ProtractorBrowser,")
        .decrease_depth()
        .add_line(") {")
        .increase_depth();
    for child in child_pages {
        code.add_line(format!(
            "this.{} = new {}(customBrowser);",
            first_to_lower(&child.name),
            child.name
        ));
    }
    code.decrease_depth()
        .add_line("}")
        .add_line("protected get browser(): ProtractorBrowser {")
        .increase_depth()
        .add_line("return this.customBrowser || _browser;")
        .decrease_depth()
        .add_line("}");
}

fn add_route(code: &mut QueuedCodeBuilder, route: Option<&str>) {
    let has_route = route.is_some();
    code.add_conditional_line("", has_route)
        .add_conditional_line(format!("route = '{}';", route.unwrap_or_default()), has_route)
        .add_conditional_line("", has_route);
}

// ============================================================================
// Element getters
// ============================================================================

fn add_getter_methods(code: &mut QueuedCodeBuilder, params: &GenerateParams<'_>) -> HashMap<ElementId, GetterFunction> {
    let mut getters = HashMap::new();
    for id in params.tree.flat() {
        let element = params.tree.get(id);
        let parent = element
            .parent()
            .and_then(|p| getters.get(&p).map(|getter| (params.tree.get(p), getter)));
        let getter = getter_function(element, parent, params.custom_browser);

        code.add_line("")
            .add_line(format!("// ElementType: {}", element.element_type()));
        params
            .snippets
            .execute(SnippetTarget::Getter, code, &SnippetContext { element, getter: &getter });

        getters.insert(id, getter);
    }
    getters
}

fn getter_function(
    element: &Element,
    parent: Option<(&Element, &GetterFunction)>,
    custom_browser: bool,
) -> GetterFunction {
    let is_array = element.is_array();
    let name = format!("get{}", element.exposed_name());
    let mut parameters = Vec::new();

    let selector_source = match parent {
        Some((parent, parent_getter)) => {
            parameters.extend(parent_getter.parameters.iter().cloned());

            let mut sub_selector = String::new();
            if parent.is_array() {
                let index = format!("{}Index", first_to_lower(parent.pure_id()));
                sub_selector = format!(".get({index})");
                parameters.push(Parameter {
                    name: index,
                    ty: "number".to_string(),
                });
            }

            format!(
                "{}{}{}",
                parent_getter.call(),
                sub_selector,
                if is_array { ".all" } else { ".element" }
            )
        }
        None => {
            let base = if custom_browser { "this.browser.element" } else { "element" };
            if is_array { format!("{base}.all") } else { base.to_string() }
        }
    };

    GetterFunction {
        name,
        parameters,
        selector_source,
    }
}

// ============================================================================
// fillForm / clearForm
// ============================================================================

/// Elements with a `target` snippet that a parameterless getter reaches.
/// Array-like elements, and elements below an array, need an index and are
/// skipped.
fn form_elements<'t>(
    tree: &'t ElementTree,
    getters: &'t HashMap<ElementId, GetterFunction>,
    snippets: &CustomSnippets,
    target: SnippetTarget,
    skipped: &DeferredFlag,
) -> Vec<SnippetContext<'t>> {
    let mut elements = Vec::new();
    for id in tree.flat() {
        let element = tree.get(id);
        if !snippets.exists(target, element) {
            continue;
        }
        let Some(getter) = getters.get(&id) else {
            continue;
        };
        if element.is_array() || !getter.parameters.is_empty() {
            warn!(element = %tree.path_of(id), ?target, "no support for array-like elements in form methods");
            skipped.set(true);
            continue;
        }
        elements.push(SnippetContext { element, getter });
    }
    elements
}

fn add_fill_form(
    code: &mut QueuedCodeBuilder,
    params: &GenerateParams<'_>,
    getters: &HashMap<ElementId, GetterFunction>,
    skipped: &DeferredFlag,
) {
    let snippets = params.snippets;
    let fill = form_elements(params.tree, getters, snippets, SnippetTarget::FillForm, skipped);
    let clear = form_elements(params.tree, getters, snippets, SnippetTarget::ClearForm, skipped);

    code.add_line("")
        .add_line("async fillForm(")
        .increase_depth()
        .add_line("data: {")
        .increase_depth();
    for ctx in &fill {
        code.add_line(format!(
            "{}?: {};",
            ctx.field_name(),
            snippets.field_types(ctx.element)
        ));
    }
    code.decrease_depth()
        .add_line("},")
        .decrease_depth()
        .add_line(") {")
        .increase_depth();
    for ctx in &fill {
        snippets.execute(SnippetTarget::FillForm, code, ctx);
    }
    code.decrease_depth()
        .add_line("}")
        .add_line("")
        .add_line("async clearForm() {")
        .increase_depth();
    for ctx in &clear {
        snippets.execute(SnippetTarget::ClearForm, code, ctx);
    }
    code.decrease_depth().add_line("}");
}
