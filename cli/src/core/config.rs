//! # Programidex Settings
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module holds the tool's own settings: where the bookkeeping directory
//! lives, which relative roots make up a project layout, and which executables
//! the external process gateway invokes. Nothing in the scaffolder reads these
//! values from ambient constants; a `Settings` value is built once per session
//! and handed to the store, the activity log and the reconciler.
//!
//! ## Architecture
//!
//! Settings sources (in order of precedence):
//! 1. The file named by the `PROGRAMIDEX_CONFIG` environment variable
//! 2. User-specific `~/.config/programidex/config.toml`
//! 3. Default values defined in the code
//!
//! Every field is defaulted, so an override file only needs the keys it changes:
//!
//! ```toml
//! [layout]
//! site_root = "site/"
//!
//! [tools]
//! hugo = "~/bin/hugo"
//! ```
//!
//! A broken override file never stops the tool: it is reported with `warn!`
//! and the defaults are used instead.
//!
use crate::core::error::{ProgramidexError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_ENV_VAR: &str = "PROGRAMIDEX_CONFIG";

/// Represents the complete settings structure, loaded from TOML.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub bookkeeping: BookkeepingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Tool-owned paths inside a project.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BookkeepingConfig {
    /// Directory holding the configuration document and the activity log.
    pub directory: String,
    /// File name of the configuration document.
    pub config_file: String,
    /// Older bookkeeping directory, still checked when loading.
    pub legacy_directory: String,
    /// File name of the append-only activity log.
    pub log_file: String,
    /// Component tag written into every log line.
    pub component: String,
}

impl Default for BookkeepingConfig {
    fn default() -> Self {
        BookkeepingConfig {
            directory: ".dex".to_string(),
            config_file: ".programidex.json".to_string(),
            legacy_directory: ".programidex".to_string(),
            log_file: "dex.log".to_string(),
            component: "programidex".to_string(),
        }
    }
}

/// Relative directory roots seeded into new blueprints.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub commands_root: String,
    pub internal_root: String,
    pub docs_root: String,
    pub site_root: String,
    pub modules_root: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            commands_root: "cmd/".to_string(),
            internal_root: "internal/".to_string(),
            docs_root: "docs/".to_string(),
            site_root: "hugo/".to_string(),
            modules_root: "modules/".to_string(),
        }
    }
}

/// Executables used by the external process gateway.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: String,
    pub go: String,
    pub hugo: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            git: "git".to_string(),
            go: "go".to_string(),
            hugo: "hugo".to_string(),
        }
    }
}

impl Settings {
    /// Directory entry for the current bookkeeping directory, as stored in blueprints (`.dex/`).
    pub fn bookkeeping_entry(&self) -> String {
        with_trailing_slash(&self.bookkeeping.directory)
    }

    /// Directory entry for the legacy bookkeeping directory (`.programidex/`).
    pub fn legacy_entry(&self) -> String {
        with_trailing_slash(&self.bookkeeping.legacy_directory)
    }

    /// Absolute path of the primary configuration document for `root`.
    pub fn config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.bookkeeping.directory)
            .join(&self.bookkeeping.config_file)
    }

    /// Absolute path of the legacy configuration document for `root`.
    pub fn legacy_config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.bookkeeping.legacy_directory)
            .join(&self.bookkeeping.config_file)
    }

    /// Absolute path of the activity log for `root`.
    pub fn log_path(&self, root: &Path) -> PathBuf {
        root.join(&self.bookkeeping.directory)
            .join(&self.bookkeeping.log_file)
    }
}

/// Appends a `/` to `entry` unless it already ends with one.
pub fn with_trailing_slash(entry: &str) -> String {
    if entry.ends_with('/') {
        entry.to_string()
    } else {
        format!("{}/", entry)
    }
}

/// # Load Settings (`load_settings`)
///
/// Resolves the settings file location, parses it if present, expands `~` in
/// tool paths and validates the result. Never fails: every problem is logged
/// and answered with `Settings::default()`.
pub fn load_settings() -> Settings {
    match try_load_settings() {
        Ok(settings) => {
            debug!("Final loaded settings: {:?}", settings);
            settings
        }
        Err(e) => {
            warn!("Ignoring programidex settings, using defaults: {:#}", e);
            Settings::default()
        }
    }
}

fn try_load_settings() -> Result<Settings> {
    let Some(path) = find_settings_path() else {
        debug!("No settings file found; using defaults.");
        return Ok(Settings::default());
    };
    info!("Loading settings from: {}", path.display());
    let mut settings = load_settings_from_path(&path)?;
    expand_tool_paths(&mut settings);
    validate_settings(&settings).context("Settings validation failed")?;
    Ok(settings)
}

fn find_settings_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(SETTINGS_ENV_VAR) {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(shellexpand::tilde(explicit.trim()).into_owned()));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "Programidex", "programidex")?;
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        Some(config_path)
    } else {
        debug!("User settings file not found at {}", config_path.display());
        None
    }
}

fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_tool_paths(settings: &mut Settings) {
    for tool in [
        &mut settings.tools.git,
        &mut settings.tools.go,
        &mut settings.tools.hugo,
    ] {
        *tool = shellexpand::tilde(tool.as_str()).into_owned();
    }
}

fn validate_settings(settings: &Settings) -> Result<()> {
    let relative_entries = [
        ("bookkeeping.directory", &settings.bookkeeping.directory),
        ("bookkeeping.config_file", &settings.bookkeeping.config_file),
        ("bookkeeping.legacy_directory", &settings.bookkeeping.legacy_directory),
        ("bookkeeping.log_file", &settings.bookkeeping.log_file),
        ("layout.commands_root", &settings.layout.commands_root),
        ("layout.internal_root", &settings.layout.internal_root),
        ("layout.docs_root", &settings.layout.docs_root),
        ("layout.site_root", &settings.layout.site_root),
        ("layout.modules_root", &settings.layout.modules_root),
    ];
    for (key, value) in relative_entries {
        validate_relative_entry(key, value)?;
    }
    for (key, value) in [
        ("tools.git", &settings.tools.git),
        ("tools.go", &settings.tools.go),
        ("tools.hugo", &settings.tools.hugo),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(ProgramidexError::Config(format!(
                "'{}' cannot be empty.",
                key
            ))));
        }
    }
    Ok(())
}

fn validate_relative_entry(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!(ProgramidexError::Config(format!(
            "'{}' cannot be empty.",
            key
        ))));
    }
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(anyhow!(ProgramidexError::Config(format!(
            "'{}' must be a relative path inside the project, got '{}'.",
            key, value
        ))));
    }
    Ok(())
}
