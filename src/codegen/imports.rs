use crate::codegen::code_builder::CodeBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportedSymbol {
    symbol: String,
    alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LibraryImport {
    from: String,
    symbols: Vec<ImportedSymbol>,
}

/// Import statements collected while code is being described, grouped by
/// source module in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct CodeBuilderImports {
    libraries: Vec<LibraryImport>,
}

impl CodeBuilderImports {
    /// Register `symbol` from `from`. A `(from, symbol)` pair is kept once;
    /// the first alias wins.
    pub fn add(&mut self, symbol: &str, from: &str, alias: Option<&str>) {
        let index = match self.libraries.iter().position(|l| l.from == from) {
            Some(index) => index,
            None => {
                self.libraries.push(LibraryImport {
                    from: from.to_string(),
                    symbols: Vec::new(),
                });
                self.libraries.len() - 1
            }
        };

        let library = &mut self.libraries[index];
        if !library.symbols.iter().any(|s| s.symbol == symbol) {
            library.symbols.push(ImportedSymbol {
                symbol: symbol.to_string(),
                alias: alias.map(str::to_string),
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// One `import { .. } from '..';` line per source module.
    pub fn render(&self, code: &mut CodeBuilder) {
        for library in &self.libraries {
            let symbols = library
                .symbols
                .iter()
                .map(|s| match &s.alias {
                    Some(alias) => format!("{} as {}", s.symbol, alias),
                    None => s.symbol.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            code.add_line(&format!("import {{ {} }} from '{}';", symbols, library.from));
        }
    }

    pub fn reset(&mut self) {
        self.libraries.clear();
    }
}
