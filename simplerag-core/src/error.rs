//! Error types for simplerag-core

use thiserror::Error;

/// Errors that can occur while building or querying the retriever
#[derive(Debug, Error)]
pub enum RagError {
    /// Embedding model could not be loaded
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Embedding length disagrees with the index dimension
    #[error("Dimension mismatch at position {position}: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        position: usize,
    },

    /// Search attempted before the index was built
    #[error("Index not ready: build() must succeed before searching")]
    IndexNotReady,

    /// Index already built; it is immutable afterwards
    #[error("Index already built")]
    IndexAlreadyBuilt,

    /// Build attempted over zero documents
    #[error("Empty corpus: at least one document is required")]
    EmptyCorpus,

    /// Text rejected by the encoder (blank query or document)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Out-of-range argument (k, model name, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Encoder failed on a batch after loading successfully
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Corpus source unreadable or malformed
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RagError {
    /// Create a model unavailable error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create an embedding error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a corpus error
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Whether the error is fatal for the whole process rather than a single query
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ModelUnavailable(_)
                | Self::DimensionMismatch { .. }
                | Self::EmptyCorpus
                | Self::Corpus(_)
                | Self::IndexNotReady
        )
    }
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_dimension_mismatch() {
        let err = RagError::DimensionMismatch {
            expected: 384,
            found: 256,
            position: 7,
        };
        assert_eq!(err.to_string(), "Dimension mismatch at position 7: expected 384, found 256");
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(RagError::model("offline").to_string(), "Model unavailable: offline");
        assert_eq!(
            RagError::invalid_input("empty query").to_string(),
            "Invalid input: empty query"
        );
        assert_eq!(RagError::corpus("bad").to_string(), "Corpus error: bad");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(RagError::EmptyCorpus.is_fatal());
        assert!(RagError::IndexNotReady.is_fatal());
        assert!(RagError::model("x").is_fatal());
        assert!(!RagError::invalid_input("x").is_fatal());
        assert!(!RagError::embedding("x").is_fatal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RagError = io_err.into();
        assert!(matches!(err, RagError::Io(_)));
    }
}
