//! # Programidex Repository Setup
//!
//! File: cli/src/commands/scaffold/remote.rs
//!
//! ## Overview
//!
//! Determines the repository identifier and the module path of a project.
//!
//! - `setup_repository` prefers an existing `origin` remote. Without one the
//!   operator either lets programidex name the repository after the project
//!   directory or types a name/URL.
//! - `module_path_from_remote` turns a remote URL into a module path, which is
//!   then offered as the default by `prompt_module_path`.
//!
use crate::common::fs::io;
use crate::common::toolchain::ExternalTools;
use crate::common::ui::prompts::{self, Prompter};
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Returns the repository identifier for the project at `root`.
pub fn setup_repository<P: Prompter + ?Sized>(
    root: &Path,
    tools: &dyn ExternalTools,
    prompter: &mut P,
) -> Result<String> {
    if let Some(url) = tools.detect_remote_origin(root) {
        prompter.say(&format!("Detected existing GitHub remote: {}", url));
        return Ok(url);
    }

    prompter.say("No GitHub remote detected.");
    prompter.say("1. Set up GitHub repo for me");
    prompter.say("2. Enter repo name manually");
    let choice = prompts::ask_trimmed(prompter, "Choose an option [1/2]: ")?;
    if choice.is_empty() || choice == "1" {
        let name = io::dir_name(root);
        prompter.say(&format!("Setting up GitHub repo named '{}'...", name));
        return Ok(name);
    }
    prompts::ask_trimmed(prompter, "Enter the GitHub repo name or URL: ")
}

/// Derives a module path from a remote URL.
///
/// ```text
/// https://github.com/acme/widgets.git  ->  github.com/acme/widgets
/// git@github.com:acme/widgets.git      ->  github.com/acme/widgets
/// ```
///
/// Anything else is returned without its `.git` suffix.
pub fn module_path_from_remote(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_suffix(".git").unwrap_or(url);
    if let Some(rest) = url.strip_prefix("https://") {
        rest.to_string()
    } else if let Some(rest) = url.strip_prefix("git@") {
        rest.replacen(':', "/", 1)
    } else {
        url.to_string()
    }
}

/// Module path derived from the `origin` remote, or empty without one.
pub fn default_module_path(root: &Path, tools: &dyn ExternalTools) -> String {
    let derived = tools
        .detect_remote_origin(root)
        .map(|url| module_path_from_remote(&url))
        .unwrap_or_default();
    debug!("Default module path: {:?}", derived);
    derived
}

/// Asks for the module path; an empty answer selects `default`.
pub fn prompt_module_path<P: Prompter + ?Sized>(prompter: &mut P, default: &str) -> Result<String> {
    prompts::ask_with_default(
        prompter,
        "Enter the Go application path (e.g., github.com/youruser/yourrepo)",
        default,
    )
}
