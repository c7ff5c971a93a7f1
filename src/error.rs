//! # Error Handling
//!
//! Centralized error type for the synchronization pipeline, built with
//! `thiserror`. The two-tier error policy lives in the callers, not here:
//! [`crate::sync`] decides which variants abort the run (workspace reset
//! failures, git clone failures) and which are logged per file and skipped
//! (XML parse errors). The external formatter has its own error type,
//! [`crate::formatter::FormatError`], because its failures never propagate
//! as `Error` at all; they only select the unformatted fallback.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for update-interfaces operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while shallow-cloning an upstream repository.
    ///
    /// Clone failures are always fatal to the run.
    #[error("Git clone error for {url}: {message}")]
    GitClone { url: String, message: String },

    /// A workspace directory could not be removed during the reset step.
    ///
    /// Absent directories are not an error; anything else (permissions,
    /// in-use handles) is.
    #[error("Workspace reset error for '{}': {message}", path.display())]
    Workspace { path: PathBuf, message: String },

    /// An interface definition file is not well-formed enough to rewrite,
    /// even though the XML reader itself did not object (e.g. no root
    /// element, truncated document).
    #[error("Malformed interface document: {message}")]
    Document { message: String },

    /// An XML syntax error, wrapped from `quick_xml::Error`.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A glob iteration error, wrapped from `glob::GlobError`.
    #[error("Glob traversal error: {0}")]
    Glob(#[from] glob::GlobError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error condemns only the file being processed rather
    /// than the whole run. Per-file errors are logged and the file skipped.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Error::Xml(_) | Error::Document { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
