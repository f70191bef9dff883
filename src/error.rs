use thiserror::Error;

/// Raised when two same-id elements cannot be told apart by their ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    /// A conflicting element is nested inside another element with the same
    /// display id. Both are given as ancestor paths.
    #[error("element '{descendant}' has the same id as its own ancestor '{ancestor}'")]
    AncestorConflict { ancestor: String, descendant: String },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("a new page object needs a name")]
    MissingName,

    #[error("cannot resolve element names: {0}")]
    Conflict(#[from] ConflictError),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no snapshot given")]
    NoSnapshot,

    #[error("cannot access '{path}': {source}")]
    Io { path: String, source: std::io::Error },

    #[error("invalid JSON snapshot '{path}': {source}")]
    JsonSnapshot { path: String, source: serde_json::Error },

    #[error("invalid YAML snapshot '{path}': {source}")]
    YamlSnapshot { path: String, source: serde_yaml::Error },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
