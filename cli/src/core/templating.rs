//! # Programidex Starter Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Starter files are the minimal boilerplate that makes a freshly created
//! directory usable: the application's `cmd/<name>/main.go`, and a module's
//! `main.go` plus its `README.md` descriptor. Their bodies are Tera templates
//! compiled into the binary and rendered with a small string context.
//!
//! Rendering only produces text. Whether a file is actually written (never
//! over an existing one) is decided by the reconciler and the installer.
//!
//! ## Examples
//!
//! ```rust
//! let body = templating::render_starter(StarterTemplate::ModuleReadme, &[("module_name", "billing")])?;
//! assert!(body.starts_with("# billing"));
//! ```
//!
use crate::core::error::{ProgramidexError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

const APP_MAIN_TEMPLATE: &str = r#"package main

import "fmt"

func main() {
    fmt.Println("Welcome to {{ app_name }}!")
}
"#;

const MODULE_MAIN_TEMPLATE: &str = r#"package main

import "fmt"

func main() {
    fmt.Println("Hello from {{ module_name }}!")
}
"#;

const MODULE_README_TEMPLATE: &str =
    "# {{ module_name }}\n\nThis is a starter module for the DEX ecosystem.\n";

/// The starter files programidex knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterTemplate {
    /// `cmd/<app_name>/main.go`; needs `app_name`.
    AppMain,
    /// `<modules_root><module_name>/main.go`; needs `module_name`.
    ModuleMain,
    /// `<modules_root><module_name>/README.md`; needs `module_name`.
    ModuleReadme,
}

impl StarterTemplate {
    /// File name the rendered template is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            StarterTemplate::AppMain | StarterTemplate::ModuleMain => "main.go",
            StarterTemplate::ModuleReadme => "README.md",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            StarterTemplate::AppMain => APP_MAIN_TEMPLATE,
            StarterTemplate::ModuleMain => MODULE_MAIN_TEMPLATE,
            StarterTemplate::ModuleReadme => MODULE_README_TEMPLATE,
        }
    }
}

/// Renders `template` with the given variables.
///
/// # Errors
///
/// `ProgramidexError::Template` if a referenced variable is missing or the
/// template fails to render.
pub fn render_starter(template: StarterTemplate, vars: &[(&str, &str)]) -> Result<String> {
    let context_map: HashMap<&str, &str> = vars.iter().copied().collect();
    let tera_context = tera::Context::from_serialize(&context_map).map_err(|e| {
        anyhow!(ProgramidexError::Template { source: e })
            .context("Failed to create Tera context from map")
    })?;
    let rendered = Tera::one_off(template.source(), &tera_context, false).map_err(|e| {
        anyhow!(ProgramidexError::Template { source: e }).context(format!(
            "Tera rendering failed for starter template '{}'",
            template.file_name()
        ))
    })?;
    debug!("Rendered starter template {:?}", template);
    Ok(rendered)
}
