//! Error types for batch checking
//!
//! A notebook failing its check is not an error; these cover the cases
//! where the run itself cannot continue.

use nborder_notebook::NotebookError;

/// Errors that abort a batch run
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Notebook could not be read or parsed
    #[error(transparent)]
    Notebook(#[from] NotebookError),

    /// Diagnostic output could not be written
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// Worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Result type alias for batch operations
pub type BatchResult<T> = Result<T, BatchError>;
