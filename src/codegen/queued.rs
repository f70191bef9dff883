use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::codegen::code_builder::CodeBuilder;
use crate::codegen::imports::CodeBuilderImports;

// ============================================================================
// Deferred values
// ============================================================================

/// Line content filled in after the line was queued. Clones share the same
/// cell; the value is read when the queue is rendered.
#[derive(Debug, Clone, Default)]
pub struct DeferredText(Rc<RefCell<String>>);

impl DeferredText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.0.borrow_mut() = value.into();
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }
}

/// Condition decided after the line was queued.
#[derive(Debug, Clone, Default)]
pub struct DeferredFlag(Rc<Cell<bool>>);

impl DeferredFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: bool) {
        self.0.set(value);
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}

// ============================================================================
// Queue steps
// ============================================================================

#[derive(Debug, Clone)]
pub enum QueueStep {
    Line(String),
    /// Condition fixed when queued.
    ConditionalLine { content: String, condition: bool },
    /// Condition read at render time.
    DynamicConditionalLine { content: String, condition: DeferredFlag },
    /// Content read at render time.
    DynamicLine(DeferredText),
    IncreaseDepth,
    DecreaseDepth,
    /// Position of the aggregated import statements.
    Imports,
}

// ============================================================================
// QueuedCodeBuilder
// ============================================================================

/// Two-phase code builder: callers describe the output as a queue of steps,
/// some of which read their value only when [`result`](Self::result) renders
/// the queue. Imports may be registered at any point and are emitted where
/// [`add_import_statements`](Self::add_import_statements) was queued.
///
/// ```
/// use page_object_gen::codegen::queued::QueuedCodeBuilder;
///
/// let mut code = QueuedCodeBuilder::new("  ");
/// code.add_line("x").increase_depth().add_line("y").decrease_depth().add_line("z");
/// assert_eq!(code.result(), "x\n  y\nz\n");
/// ```
#[derive(Debug, Clone)]
pub struct QueuedCodeBuilder {
    tab: String,
    queue: Vec<QueueStep>,
    imports: CodeBuilderImports,
}

impl Default for QueuedCodeBuilder {
    fn default() -> Self {
        Self::new("  ")
    }
}

impl QueuedCodeBuilder {
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            queue: Vec::new(),
            imports: CodeBuilderImports::default(),
        }
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    pub fn steps(&self) -> &[QueueStep] {
        &self.queue
    }

    /// Render every queued step in order against a fresh [`CodeBuilder`].
    pub fn result(&self) -> String {
        let mut code = CodeBuilder::new(self.tab.as_str());
        for step in &self.queue {
            self.render_step(step, &mut code);
        }
        code.into_result()
    }

    fn render_step(&self, step: &QueueStep, code: &mut CodeBuilder) {
        match step {
            QueueStep::Line(content) => {
                code.add_line(content);
            }
            QueueStep::ConditionalLine { content, condition } => {
                if *condition {
                    code.add_line(content);
                }
            }
            QueueStep::DynamicConditionalLine { content, condition } => {
                if condition.get() {
                    code.add_line(content);
                }
            }
            QueueStep::DynamicLine(content) => {
                code.add_line(&content.get());
            }
            QueueStep::IncreaseDepth => {
                code.increase_depth();
            }
            QueueStep::DecreaseDepth => {
                code.decrease_depth();
            }
            QueueStep::Imports => self.imports.render(code),
        }
    }

    pub fn add_line(&mut self, content: impl Into<String>) -> &mut Self {
        self.queue.push(QueueStep::Line(content.into()));
        self
    }

    pub fn add_conditional_line(&mut self, content: impl Into<String>, condition: bool) -> &mut Self {
        self.queue.push(QueueStep::ConditionalLine {
            content: content.into(),
            condition,
        });
        self
    }

    pub fn add_dynamic_conditional_line(
        &mut self,
        content: impl Into<String>,
        condition: &DeferredFlag,
    ) -> &mut Self {
        self.queue.push(QueueStep::DynamicConditionalLine {
            content: content.into(),
            condition: condition.clone(),
        });
        self
    }

    pub fn add_dynamic_line(&mut self, content: &DeferredText) -> &mut Self {
        self.queue.push(QueueStep::DynamicLine(content.clone()));
        self
    }

    pub fn increase_depth(&mut self) -> &mut Self {
        self.queue.push(QueueStep::IncreaseDepth);
        self
    }

    pub fn decrease_depth(&mut self) -> &mut Self {
        self.queue.push(QueueStep::DecreaseDepth);
        self
    }

    /// `import { symbol } from 'from';`
    pub fn add_import(&mut self, symbol: &str, from: &str) -> &mut Self {
        self.imports.add(symbol, from, None);
        self
    }

    /// `import { symbol as alias } from 'from';`
    pub fn add_import_as(&mut self, symbol: &str, from: &str, alias: &str) -> &mut Self {
        self.imports.add(symbol, from, Some(alias));
        self
    }

    /// Mark where the collected imports are rendered.
    pub fn add_import_statements(&mut self) -> &mut Self {
        self.queue.push(QueueStep::Imports);
        self
    }

    /// Clear both the queue and the collected imports.
    pub fn reset(&mut self) -> &mut Self {
        self.queue.clear();
        self.imports.reset();
        self
    }
}
