//! # Programidex Configuration Store
//!
//! File: cli/src/core/store.rs
//!
//! ## Overview
//!
//! The configuration store is the only component that reads or writes the
//! persisted blueprint document. It knows two locations:
//!
//! - the primary document, `<root>/.dex/.programidex.json`, which is always
//!   the one written;
//! - the legacy document, `<root>/.programidex/.programidex.json`, which is
//!   still honoured when loading projects initialized by older releases.
//!
//! ## Contract
//!
//! - `load` never fails. Missing, unreadable and malformed documents all come
//!   back as `Blueprint::default()`.
//! - `load_existing` distinguishes "usable blueprint on disk" from "nothing
//!   usable", which is what state detection needs.
//! - `save` writes deterministic pretty JSON through a temporary file and a
//!   rename, so an interrupted run leaves either the old or the new document.
//!   It refuses to change the kind of an already persisted blueprint. Errors
//!   are returned to the caller; the in-memory blueprint stays valid.
//!
use crate::common::fs::io;
use crate::core::blueprint::Blueprint;
use crate::core::config::Settings;
use crate::core::error::{ProgramidexError, Result};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # Configuration Store (`ConfigStore`)
///
/// Reads and writes the blueprint document at fixed, injected locations.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    primary: PathBuf,
    legacy: PathBuf,
}

impl ConfigStore {
    pub fn new(primary: impl Into<PathBuf>, legacy: impl Into<PathBuf>) -> Self {
        ConfigStore {
            primary: primary.into(),
            legacy: legacy.into(),
        }
    }

    /// Builds a store for the project rooted at `root` using the configured bookkeeping paths.
    pub fn for_project(root: &Path, settings: &Settings) -> Self {
        ConfigStore::new(settings.config_path(root), settings.legacy_config_path(root))
    }

    /// Location every `save` writes to.
    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    /// True when either the primary or the legacy document exists.
    pub fn exists(&self) -> bool {
        self.primary.is_file() || self.legacy.is_file()
    }

    /// The document that `load` reads: the primary one, else the legacy one.
    fn source_path(&self) -> Option<&Path> {
        if self.primary.is_file() {
            Some(&self.primary)
        } else if self.legacy.is_file() {
            Some(&self.legacy)
        } else {
            None
        }
    }

    /// Loads the blueprint, yielding the zero value on any failure.
    pub fn load(&self) -> Blueprint {
        self.load_existing().unwrap_or_default()
    }

    /// Loads the blueprint only if a parseable document exists.
    pub fn load_existing(&self) -> Option<Blueprint> {
        let path = self.source_path()?;
        let content = match io::read_file_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Treating unreadable blueprint as absent: {:#}", e);
                return None;
            }
        };
        match serde_json::from_str::<Blueprint>(&content) {
            Ok(blueprint) => {
                debug!("Loaded blueprint from {}", path.display());
                Some(blueprint)
            }
            Err(e) => {
                debug!(
                    "Treating malformed blueprint at {} as absent: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persists `blueprint` to the primary location.
    ///
    /// # Errors
    ///
    /// - `KindChangeRejected` if a persisted blueprint already has a different kind.
    /// - Serialization or filesystem failures, with the target path as context.
    pub fn save(&self, blueprint: &Blueprint) -> Result<()> {
        if let Some(persisted) = self.load_existing() {
            if let (Some(old), Some(new)) = (persisted.kind, blueprint.kind) {
                if old != new {
                    return Err(anyhow!(ProgramidexError::KindChangeRejected {
                        persisted: old.to_string(),
                        requested: new.to_string(),
                    }));
                }
            }
        }
        let mut document = blueprint.to_pretty_json()?;
        document.push('\n');
        io::write_string_atomically(&self.primary, &document).with_context(|| {
            format!(
                "Failed to save blueprint configuration to {}",
                self.primary.display()
            )
        })?;
        info!("Saved blueprint configuration to {}", self.primary.display());
        Ok(())
    }
}
