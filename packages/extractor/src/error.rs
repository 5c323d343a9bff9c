//! Error types for the extractor.
//!
//! Only input problems are errors. A register header whose mandatory fields
//! never show up is not an error: the extraction engine drops it silently.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON processing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file type is not understood.
    #[error("Unsupported input '{path}': {reason}")]
    UnsupportedInput { path: String, reason: String },

    /// The PDF backend could not open or read the document.
    #[error("PDF backend failed: {0}")]
    Pdf(String),

    /// Invalid page range format.
    #[error("Invalid page range: '{0}'. Expected N or N-M with 1 <= N <= M (e.g., 572-573)")]
    InvalidPageRange(String),

    /// Requested page does not exist in the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// No register matched a lookup query.
    #[error("No register matches '{0}'")]
    RegisterNotFound(String),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
