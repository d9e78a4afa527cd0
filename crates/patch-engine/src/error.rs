//! Engine error type.

use thiserror::Error;

/// Errors that can occur while producing patches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Selection indices outside the file, or an inverted range.
    #[error("Line range {start}..={end} is invalid{}", bounds_suffix(.len))]
    Range {
        start: usize,
        end: usize,
        /// Number of lines in the file, when the range was checked against one.
        len: Option<usize>,
    },

    /// The file does not exist at the requested revision.
    #[error("File not found: {path} at {revision}")]
    NotFound { path: String, revision: String },

    /// Retryable network or API failure.
    #[error("Transient failure for {path}: {message}")]
    Transient { path: String, message: String },

    /// The file exists but its content cannot be diffed (binary, unreadable).
    #[error("Cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    /// A reviewer comment selects no lines on either side.
    #[error("Comment on {path} selects no lines on either side")]
    EmptySelection { path: String },

    /// The changed-file listing did not make progress.
    #[error("Changed-file listing is inconsistent: {0}")]
    Integrity(String),

    /// The enclosing request was cancelled or timed out.
    #[error("Request cancelled")]
    Cancelled,

    /// A diff worker panicked or its task was lost.
    #[error("Diff worker failed for {path}: {message}")]
    Worker { path: String, message: String },
}

impl PatchError {
    /// Whether the caller may retry the failed operation with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PatchError::Transient { .. })
    }
}

fn bounds_suffix(len: &Option<usize>) -> String {
    match len {
        Some(len) => format!(" for a file of {} lines", len),
        None => String::new(),
    }
}
