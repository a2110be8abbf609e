use thiserror::Error;

/// Library-level error type.
///
/// Partial failures (one attachment, one record) never surface here as a
/// batch error; they are logged and counted by the pipeline instead.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from {0}")]
    EmptyDocument(String),

    #[error("Extraction failed for '{title}': {reason}")]
    Extraction { title: String, reason: String },

    #[error("Embedding error: {0}")]
    Embedding(String),
}

impl MatcherError {
    /// True when the error means the input itself is unusable, so the
    /// batch cannot proceed on it.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            MatcherError::NotFound(_) | MatcherError::InvalidJson(_) | MatcherError::Io(_)
        )
    }
}
