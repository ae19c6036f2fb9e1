//! # Programidex Module Installer
//!
//! File: cli/src/commands/scaffold/installer.rs
//!
//! ## Overview
//!
//! Adds a module skeleton under the modules root of an existing project:
//!
//! ```text
//! modules/<name>/
//! modules/<name>/main.go
//! modules/<name>/README.md
//! ```
//!
//! The operator picks a name (the `<project>-module` default is offered only
//! while it is free), sees the three paths, and confirms. Files are created
//! with the same never-overwrite policy as the reconciler. Only a fully
//! successful install is recorded in the blueprint.
//!
use crate::commands::scaffold::reconciler::{Action, Outcome, Reconciler};
use crate::common::fs::io;
use crate::common::ui::prompts::{self, Prompter};
use crate::core::activity::ActivityLog;
use crate::core::blueprint::Blueprint;
use crate::core::config::{with_trailing_slash, Settings};
use crate::core::error::{ProgramidexError, Result};
use crate::core::store::ConfigStore;
use crate::core::templating::{self, StarterTemplate};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Checks that `name` can be used as a single directory name.
///
/// # Errors
///
/// `InvalidModuleName` for empty names, `.`/`..`, or names containing a path
/// separator.
pub fn validate_module_name(name: &str) -> std::result::Result<(), ProgramidexError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(ProgramidexError::InvalidModuleName(name.to_string())),
    }
}

/// `<project directory name>-module`.
pub fn default_module_name(root: &Path) -> String {
    format!("{}-module", io::dir_name(root))
}

pub struct ModuleInstaller<'a> {
    reconciler: Reconciler<'a>,
    settings: &'a Settings,
    log: &'a ActivityLog,
}

impl<'a> ModuleInstaller<'a> {
    pub fn new(root: &'a Path, settings: &'a Settings, log: &'a ActivityLog) -> Self {
        ModuleInstaller {
            reconciler: Reconciler::new(root, settings, log),
            settings,
            log,
        }
    }

    fn root(&self) -> &Path {
        self.reconciler.root()
    }

    /// Blueprint entry for the module: `<modules_root><name>/`.
    pub fn module_entry(&self, name: &str) -> String {
        format!(
            "{}{}/",
            with_trailing_slash(&self.settings.layout.modules_root),
            name
        )
    }

    /// The three paths an install creates, in creation order.
    pub fn module_paths(&self, name: &str) -> [String; 3] {
        let entry = self.module_entry(name);
        [
            entry.clone(),
            format!("{}{}", entry, StarterTemplate::ModuleMain.file_name()),
            format!("{}{}", entry, StarterTemplate::ModuleReadme.file_name()),
        ]
    }

    /// # Choose Module Name (`choose_module_name`)
    ///
    /// Offers the default name when `<modules_root><default>` does not exist,
    /// otherwise asks for a custom one. Invalid names are re-asked.
    ///
    /// Returns `None` when input ends before a name is chosen.
    pub fn choose_module_name<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
    ) -> Result<Option<String>> {
        let default = default_module_name(self.root());
        if self.root().join(self.module_entry(&default)).exists() {
            prompter.say(&format!("Default module '{}' already exists.", default));
        } else {
            prompter.say(&format!(
                "No '{}' found in {}.",
                default,
                with_trailing_slash(&self.settings.layout.modules_root)
            ));
            let question = format!("Would you like to use the default module name '{}'?", default);
            if prompts::confirm(prompter, &question)? {
                return Ok(Some(default));
            }
        }

        loop {
            let Some(answer) = prompter.ask("Enter custom module name: ")? else {
                return Ok(None);
            };
            let name = answer.trim();
            match validate_module_name(name) {
                Ok(()) => return Ok(Some(name.to_string())),
                Err(e) => prompter.say(&e.to_string()),
            }
        }
    }

    /// Creates the module directory, its starter and its descriptor.
    ///
    /// # Errors
    ///
    /// Returns an `Err` only if a starter template fails to render; filesystem
    /// failures are reported as `Outcome::Failed`.
    pub fn install_files(&self, name: &str) -> Result<Vec<Outcome>> {
        let [dir, main, readme] = self.module_paths(name);
        let vars = [("module_name", name)];
        let mut actions = Vec::with_capacity(3);
        if !self.root().join(&dir).is_dir() {
            actions.push(Action::CreateDirectory(PathBuf::from(&dir)));
        }
        actions.extend([
            Action::CreateFile {
                path: PathBuf::from(main),
                content: templating::render_starter(StarterTemplate::ModuleMain, &vars)?,
            },
            Action::CreateFile {
                path: PathBuf::from(readme),
                content: templating::render_starter(StarterTemplate::ModuleReadme, &vars)?,
            },
        ]);
        Ok(self.reconciler.apply(actions))
    }

    /// # Run Module Install (`run`)
    ///
    /// The complete interactive install. On success the module directory is
    /// appended to `blueprint` and persisted through `store`. Returns whether a
    /// module was installed.
    pub fn run<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        store: &ConfigStore,
        blueprint: &mut Blueprint,
    ) -> Result<bool> {
        let Some(name) = self.choose_module_name(prompter)? else {
            prompter.say("Aborted module creation.");
            self.log.record("User aborted module blueprint creation.");
            return Ok(false);
        };

        prompter.say("\nModule blueprint to be created:");
        for path in self.module_paths(&name) {
            prompter.say(&path);
        }
        if !prompts::confirm(prompter, "\nProceed with module creation?")? {
            prompter.say("Aborted module creation.");
            self.log.record("User aborted module blueprint creation.");
            return Ok(false);
        }

        let outcomes = self.install_files(&name)?;
        for outcome in &outcomes {
            prompter.say(&outcome.to_string());
        }
        if let Some(Outcome::Failed { path, cause }) = outcomes.iter().find(|o| o.is_failure()) {
            let message = format!(
                "Failed to install module blueprint: {}: {}",
                path.display(),
                cause
            );
            prompter.say(&message);
            self.log.record(&message);
            return Ok(false);
        }

        let message = format!("Module blueprint '{}' installed.", name);
        prompter.say(&message);
        self.log.record(&message);

        if blueprint.add_directory(&self.module_entry(&name)) {
            debug!("Recording module '{}' in blueprint", name);
        }
        match store.save(blueprint) {
            Ok(()) => self.log.record("Updated configuration with new module."),
            Err(e) => {
                let message = format!("Failed to save configuration: {:#}", e);
                prompter.say(&message);
                self.log.record(&message);
            }
        }
        Ok(true)
    }
}
