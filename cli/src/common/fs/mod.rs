//! # Programidex Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Organizational entry point for filesystem helpers. Functionality currently
//! lives in a single submodule:
//!
//! - **`io`**: directory creation (`ensure_dir_exists`), whole-file reads and
//!   writes, atomic replacement of the blueprint document, and the
//!   create-if-missing write used for every starter file.
//!
//! Callers import the submodule directly:
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(Path::new("docs"))?;
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `create_file_if_missing`, ...).
pub mod io;
