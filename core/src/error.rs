//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// Every component returns this to its caller; only the CLI boundary turns a
/// failure into a user-visible message and exit status.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The expected root has no `Cargo.toml`.
    #[from(ignore)]
    #[display("not a project (no Cargo.toml): {_0:?}")]
    NotAProject(PathBuf),

    /// A destination path is already present.
    #[from(ignore)]
    #[display("path already exists: {_0:?}")]
    PathExists(PathBuf),

    /// An expected source or app directory is absent.
    #[from(ignore)]
    #[display("path does not exist: {_0:?}")]
    PathMissing(PathBuf),

    /// The requested table is not present in the schema source.
    #[from(ignore)]
    #[display("table not found in schema: {_0}")]
    SchemaNotFound(String),

    /// No top-level function with the given name exists in the target file.
    #[from(ignore)]
    #[display("function `{function}` not found in {file:?}")]
    FunctionNotFound {
        /// File that was searched.
        file: PathBuf,
        /// Function name that was looked up.
        function: String,
    },

    /// A source file (or statement text) failed to parse.
    #[from(ignore)]
    #[display("parse error in {file:?}: {detail}")]
    Parse {
        /// File the source text came from.
        file: PathBuf,
        /// Collected parser diagnostics.
        detail: String,
    },

    /// Template rendering failure.
    #[display("template error: {_0}")]
    Template(minijinja::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
