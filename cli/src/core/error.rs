//! # Programidex Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout programidex. Domain
//! failures that callers need to recognise (an invalid project kind, a rejected
//! kind change, a failed external command) are variants of `ProgramidexError`;
//! everything else travels as `anyhow::Error` with context attached at the
//! point of failure.
//!
//! ## Architecture
//!
//! - `ProgramidexError`: a `thiserror` enum of recognisable failures.
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//! - `is_invalid_project_kind`: lets `main` pick the one non-zero exit path.
//!
//! Most failures in this tool are "skip and continue": they are logged to the
//! project activity log, reported to the operator and the session carries on.
//! Only an unrecognised project kind during first-run initialization terminates
//! the process with a non-zero status.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if name.is_empty() {
//!     anyhow::bail!(ProgramidexError::InvalidModuleName(name.to_string()));
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for programidex.
#[derive(Error, Debug)]
pub enum ProgramidexError {
    #[error("Invalid type '{0}'. Please enter 'app' or 'module'.")]
    InvalidProjectKind(String),

    #[error("Invalid module name '{0}': expected a single, non-empty directory name.")]
    InvalidModuleName(String),

    #[error("Project kind is '{persisted}' and cannot be changed to '{requested}'.")]
    KindChangeRejected {
        persisted: String,
        requested: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Blueprint serialization failed: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

/// Returns true when the root cause of `err` is an unrecognised project kind.
///
/// `main` uses this to decide the process exit status: this is the single
/// input error that aborts the tool with a non-zero code.
pub fn is_invalid_project_kind(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ProgramidexError>(),
            Some(ProgramidexError::InvalidProjectKind(_))
        )
    })
}
