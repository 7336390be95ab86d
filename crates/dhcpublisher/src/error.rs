use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting a single archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("entry path escapes the extraction directory: {0}")]
    UnsafeEntryPath(String),
}

/// Errors that can occur while rendering one subdirectory's document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The subdirectory holds no HTML file at all. A precondition failure,
    /// reported separately from pipeline breakage.
    #[error("{} does not contain HTML files", .0.display())]
    NoHtmlFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render pipeline error: {0}")]
    Pipeline(String),
}

/// Fatal errors that abort a whole batch run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{} does not exist", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A per-item failure recorded by a batch loop (non-fatal).
#[derive(Debug)]
pub struct BatchFailure {
    /// The archive or subdirectory that failed.
    pub item: PathBuf,
    /// Cause, in display form.
    pub reason: String,
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.item.display(), self.reason)
    }
}

/// Outcome of one batch loop: how many items went through, and the
/// failures that were skipped over.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Items processed to completion.
    pub succeeded: usize,
    /// Items that failed and were skipped.
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    /// Total number of items the batch attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}
