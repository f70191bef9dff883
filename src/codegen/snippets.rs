use crate::codegen::page_object::GetterFunction;
use crate::codegen::queued::QueuedCodeBuilder;
use crate::element::case::{first_to_lower, pascal_to_kebab};
use crate::element::element_model::Element;

const PROTRACTOR: &str = "protractor";
const PROTRACTOR_PTOR: &str = "protractor/built/ptor";

/// Element type that gets `fillForm` / `clearForm` support by default.
pub const FORM_INPUT_TYPE: &str = "INPUT";

/// Field type used when no matching fill-form snippet declares one.
const UNTYPED_FIELD: &str = "any";

// ============================================================================
// Snippet rules
// ============================================================================

/// Part of the generated class a snippet contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetTarget {
    /// Emitted for every element after its `// ElementType` comment.
    Getter,
    /// Body of `fillForm`; matching elements also get a `data` field.
    FillForm,
    /// Body of `clearForm`.
    ClearForm,
}

/// What an emitter knows about the element it writes code for.
#[derive(Debug, Clone, Copy)]
pub struct SnippetContext<'a> {
    pub element: &'a Element,
    pub getter: &'a GetterFunction,
}

impl SnippetContext<'_> {
    /// `ElementArrayFinder` for array elements, `ElementFinder` otherwise.
    pub fn return_type(&self) -> &'static str {
        if self.element.is_array() {
            "ElementArrayFinder"
        } else {
            "ElementFinder"
        }
    }

    /// `.e2e-<kebab pure id>`
    pub fn css_class(&self) -> String {
        format!(".e2e-{}", pascal_to_kebab(self.element.pure_id()))
    }

    /// Key of the element in the `fillForm` data object.
    pub fn field_name(&self) -> String {
        first_to_lower(&self.element.exposed_name())
    }
}

pub type SnippetCondition = fn(&Element) -> bool;
pub type SnippetEmitter = fn(&mut QueuedCodeBuilder, &SnippetContext<'_>);

/// A condition over elements and the code written for every match.
#[derive(Clone, Copy)]
pub struct CustomSnippet {
    pub condition: SnippetCondition,
    pub emit: SnippetEmitter,

    /// TypeScript type of the `fillForm` data field. Only read for
    /// [`SnippetTarget::FillForm`] snippets.
    pub field_type: Option<&'static str>,
}

impl CustomSnippet {
    pub fn new(condition: SnippetCondition, emit: SnippetEmitter) -> Self {
        Self {
            condition,
            emit,
            field_type: None,
        }
    }

    pub fn typed(mut self, field_type: &'static str) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

impl std::fmt::Debug for CustomSnippet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomSnippet")
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

/// Ordered snippet lists, one per [`SnippetTarget`]. Every matching snippet
/// runs, in registration order.
///
/// [`Default`] registers the plain getter for every element and the
/// `sendKeys` / `BACK_SPACE` form handling for `INPUT` elements.
#[derive(Debug, Clone)]
pub struct CustomSnippets {
    getter: Vec<CustomSnippet>,
    fill_form: Vec<CustomSnippet>,
    clear_form: Vec<CustomSnippet>,
}

impl Default for CustomSnippets {
    fn default() -> Self {
        let mut snippets = Self::empty();
        snippets.add_for_getter_functions(CustomSnippet::new(|_| true, emit_getter));
        snippets.add_for_fill_form(CustomSnippet::new(is_input, emit_fill_input).typed("string"));
        snippets.add_for_clear_form(CustomSnippet::new(is_input, emit_clear_input));
        snippets
    }
}

impl CustomSnippets {
    /// No snippets at all, not even the getters.
    pub fn empty() -> Self {
        Self {
            getter: Vec::new(),
            fill_form: Vec::new(),
            clear_form: Vec::new(),
        }
    }

    pub fn add_for_getter_functions(&mut self, snippet: CustomSnippet) -> &mut Self {
        self.getter.push(snippet);
        self
    }

    pub fn add_for_fill_form(&mut self, snippet: CustomSnippet) -> &mut Self {
        self.fill_form.push(snippet);
        self
    }

    pub fn add_for_clear_form(&mut self, snippet: CustomSnippet) -> &mut Self {
        self.clear_form.push(snippet);
        self
    }

    fn list(&self, target: SnippetTarget) -> &[CustomSnippet] {
        match target {
            SnippetTarget::Getter => &self.getter,
            SnippetTarget::FillForm => &self.fill_form,
            SnippetTarget::ClearForm => &self.clear_form,
        }
    }

    pub fn exists(&self, target: SnippetTarget, element: &Element) -> bool {
        self.list(target).iter().any(|s| (s.condition)(element))
    }

    /// Run every snippet of `target` whose condition holds for the element.
    pub fn execute(&self, target: SnippetTarget, code: &mut QueuedCodeBuilder, ctx: &SnippetContext<'_>) {
        for snippet in self.list(target) {
            if (snippet.condition)(ctx.element) {
                (snippet.emit)(code, ctx);
            }
        }
    }

    /// Union of the field types of matching fill-form snippets: `string | number`.
    pub fn field_types(&self, element: &Element) -> String {
        let mut types: Vec<&str> = Vec::new();
        for snippet in &self.fill_form {
            if !(snippet.condition)(element) {
                continue;
            }
            let ty = snippet.field_type.unwrap_or(UNTYPED_FIELD);
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
        types.join(" | ")
    }
}

// ============================================================================
// Default snippets
// ============================================================================

fn is_input(element: &Element) -> bool {
    element.element_type() == FORM_INPUT_TYPE
}

fn emit_getter(code: &mut QueuedCodeBuilder, ctx: &SnippetContext<'_>) {
    let return_type = ctx.return_type();
    let visibility = if ctx.element.is_private() { "private " } else { "" };

    code.add_import(return_type, PROTRACTOR)
        .add_line(format!(
            "{}{}({}): {} {{",
            visibility,
            ctx.getter.name,
            ctx.getter.parameter_list(),
            return_type
        ))
        .increase_depth()
        .add_line(format!(
            "return {}(by.css('{}'));",
            ctx.getter.selector_source,
            ctx.css_class()
        ))
        .decrease_depth()
        .add_line("}");
}

fn emit_fill_input(code: &mut QueuedCodeBuilder, ctx: &SnippetContext<'_>) {
    let field = ctx.field_name();
    code.add_line(format!("if (data.{field}) {{"))
        .increase_depth()
        .add_line(format!("await {}.sendKeys(data.{field});", ctx.getter.call()))
        .decrease_depth()
        .add_line("}");
}

fn emit_clear_input(code: &mut QueuedCodeBuilder, ctx: &SnippetContext<'_>) {
    code.add_import(PROTRACTOR, PROTRACTOR_PTOR)
        .add_line("{")
        .increase_depth()
        .add_line(format!("const input = {};", ctx.getter.call()))
        .add_line("const value: string = await input.getAttribute('value');")
        .add_line("for (let i = 0; i < value.length; i++) {")
        .increase_depth()
        .add_line("await input.sendKeys(protractor.Key.BACK_SPACE);")
        .decrease_depth()
        .add_line("}")
        .decrease_depth()
        .add_line("}");
}
