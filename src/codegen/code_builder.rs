/// Line buffer with a tracked indentation depth.
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    code: String,
    tab: String,
    depth: usize,
}

impl CodeBuilder {
    /// `tab` is the text emitted once per depth level, e.g. `"  "`.
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            tab: tab.into(),
            depth: 0,
        }
    }

    /// Append an indented line. Empty content yields a bare newline.
    pub fn add_line(&mut self, content: &str) -> &mut Self {
        if content.is_empty() {
            self.code.push('\n');
            return self;
        }
        for _ in 0..self.depth {
            self.code.push_str(&self.tab);
        }
        self.code.push_str(content);
        self.code.push('\n');
        self
    }

    pub fn increase_depth(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Saturates at zero.
    pub fn decrease_depth(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Clears the buffer; the depth is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.code.clear();
        self
    }

    pub fn result(&self) -> &str {
        &self.code
    }

    pub fn into_result(self) -> String {
        self.code
    }
}
