//! # Programidex Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Root of the shared utility modules: the thin I/O plumbing that the
//! scaffolding flows in `commands::` are built on. None of these modules make
//! decisions about a project; they touch the filesystem, run processes and talk
//! to the operator.
//!
//! ## Architecture
//!
//! - **`fs`**: filesystem helpers (directory creation, create-if-missing writes, atomic replacement).
//! - **`process`**: blocking execution of external commands, captured or streamed.
//! - **`toolchain`**: the `ExternalTools` gateway (`git`, `go`, `hugo`) and its system implementation.
//! - **`ui`**: line-oriented operator prompts.
//!
//! ```rust
//! use crate::common::{fs::io, toolchain::ExternalTools};
//!
//! io::ensure_dir_exists(&root.join("docs"))?;
//! let origin = tools.detect_remote_origin(&root);
//! ```
//!

/// Filesystem operations (`io`).
pub mod fs;
/// Execution of external processes.
pub mod process;
/// The external process gateway used by the scaffolding flows.
pub mod toolchain;
/// Operator prompts.
pub mod ui;
