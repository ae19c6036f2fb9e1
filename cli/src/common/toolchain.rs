//! # Programidex External Tool Gateway (`common::toolchain`)
//!
//! File: cli/src/common/toolchain.rs
//!
//! ## Overview
//!
//! The scaffolder needs three things from the outside world: the URL of the
//! `origin` remote, a `go mod init`, and a `hugo new site`. The
//! `ExternalTools` trait is that contract; `SystemTools` fulfils it by shelling
//! out through `common::process` with binaries taken from `Settings`.
//!
//! The *when* of each call (manifest absent, module path known, site directory
//! empty) belongs to the callers. The gateway only runs commands and reports.
//!
//! Tests substitute a recording fake for `SystemTools`, so none of the flows
//! above this module need real tools installed.
//!
use crate::common::process;
use crate::core::config::ToolsConfig;
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Contract for the external commands the scaffolder consumes.
pub trait ExternalTools {
    /// URL of the `origin` remote for the repository containing `root`.
    ///
    /// Absence of git, of a repository, or of the remote all yield `None`.
    fn detect_remote_origin(&self, root: &Path) -> Option<String>;

    /// Initializes the module manifest (`go.mod`) in `root`.
    fn initialize_module_manifest(&self, root: &Path, module_path: &str) -> Result<()>;

    /// Generates a static site skeleton in `target_dir`.
    fn create_static_site(&self, target_dir: &Path) -> Result<()>;
}

/// `ExternalTools` backed by real executables.
#[derive(Debug, Clone)]
pub struct SystemTools {
    tools: ToolsConfig,
}

impl SystemTools {
    pub fn new(tools: ToolsConfig) -> Self {
        SystemTools { tools }
    }
}

impl ExternalTools for SystemTools {
    fn detect_remote_origin(&self, root: &Path) -> Option<String> {
        match process::run_command_capture(
            &self.tools.git,
            &["remote", "get-url", "origin"],
            Some(root),
        ) {
            Ok(url) if !url.is_empty() => Some(url),
            Ok(_) => None,
            Err(e) => {
                debug!("No origin remote detected: {:#}", e);
                None
            }
        }
    }

    fn initialize_module_manifest(&self, root: &Path, module_path: &str) -> Result<()> {
        process::run_command_streamed(&self.tools.go, &["mod", "init", module_path], Some(root))
    }

    fn create_static_site(&self, target_dir: &Path) -> Result<()> {
        let target = target_dir.to_string_lossy();
        process::run_command_streamed(&self.tools.hugo, &["new", "site", target.as_ref()], None)
    }
}
