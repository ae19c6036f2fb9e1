//! # Programidex Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module holds the filesystem helpers of programidex: thin, context-adding
//! wrappers around `std::fs` used by the store, the reconciler and the module
//! installer.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p` that treats an existing directory as success and an existing *file* as an error.
//! - **`read_file_to_string`**: whole-file reads with the path in the error context.
//! - **`write_string_atomically`**: writes through a sibling temporary file and renames it into place. Used for the blueprint document.
//! - **`create_file_if_missing`**: create-new semantics; an existing file is left untouched and reported as such. This is what every starter file goes through.
//! - **`is_dir_empty`** / **`dir_name`**: small checks used by the site and module flows.
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(Path::new("modules/billing"))?;
//! match io::create_file_if_missing(Path::new("modules/billing/main.go"), body)? {
//!     FileWrite::Created => println!("created"),
//!     FileWrite::AlreadyExists => println!("kept existing file"),
//! }
//! ```
//!
use crate::core::error::{ProgramidexError, Result};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Result of a create-if-missing write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileWrite {
    /// The file did not exist and was written.
    Created,
    /// A file was already present; its content was not touched.
    AlreadyExists,
}

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory is created along with any
/// missing parents. An existing directory is a no-op.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ProgramidexError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with
/// context naming the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// # Write String Atomically (`write_string_atomically`)
///
/// Writes `content` to `<path>.tmp` in the same directory and renames it over
/// `path`. Readers see either the previous document or the complete new one.
pub fn write_string_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            ProgramidexError::FileSystem(format!("Path has no file name: {:?}", path))
        })?
        .to_string_lossy();
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temporary file {:?}", temp_path))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temporary file {:?}", temp_path))?;
        file.sync_all()
            .with_context(|| format!("Failed to flush temporary file {:?}", temp_path))?;
    }
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move {:?} into place at {:?}", temp_path, path))?;
    debug!("Atomically wrote {:?}", path);
    Ok(())
}

/// # Create File If Missing (`create_file_if_missing`)
///
/// Creates `path` with `content` only if nothing exists there yet. The check
/// and the creation are a single `create_new` open, so a file that appears
/// concurrently is never overwritten. The parent directory must exist.
///
/// ## Returns
///
/// * `FileWrite::Created` when the file was written.
/// * `FileWrite::AlreadyExists` when an existing file was left untouched.
pub fn create_file_if_missing(path: &Path, content: &str) -> Result<FileWrite> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Keeping existing file: {:?}", path);
            return Ok(FileWrite::AlreadyExists);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("Failed to create file {:?}", path)))
        }
    };
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Created file: {:?}", path);
    Ok(FileWrite::Created)
}

/// True when `path` is a directory without any entries.
///
/// # Errors
///
/// Returns an `Err` if the directory cannot be read.
pub fn is_dir_empty(path: &Path) -> Result<bool> {
    let mut entries =
        fs::read_dir(path).with_context(|| format!("Could not read directory {:?}", path))?;
    Ok(entries.next().is_none())
}

/// Final component of `path` as a string (the project directory name).
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
