use okwu_types::CategoryFilter;

/// Errors scoped to a single session operation
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No words available for category `{0}`")]
    EmptyCatalog(CategoryFilter),

    #[error("Unrecognized category: {0}")]
    InvalidCategory(String),

    #[error("Failed to load audio clip {path}: {reason}")]
    AudioLoad { path: String, reason: String },

    #[error("No audio output available: {0}")]
    AudioOutput(String),
}

/// Errors raised while building the word catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog contains no words")]
    Empty,

    #[error("Duplicate word in catalog: {0}")]
    DuplicateWord(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
