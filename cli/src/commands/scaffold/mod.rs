//! # Programidex Scaffold Session
//!
//! File: cli/src/commands/scaffold/mod.rs
//!
//! ## Overview
//!
//! A programidex run is a single interactive session against one project
//! root. What the session does depends on the project's state:
//!
//! - **Uninitialized**: the first-run flow. Ask for the project kind, the
//!   repository and the module path, preview the blueprint, and on
//!   confirmation create the layout, initialize the module manifest, write
//!   the application entrypoint and persist the blueprint. Applications with
//!   modules are then offered an immediate module install.
//! - **Initialized, incomplete** (no repository identifier): offer to set the
//!   repository up now; declining leaves the blueprint untouched.
//! - **Initialized, complete**: check the layout and repair what is missing.
//!
//! Initialized projects then get the menu (install module, view config, exit,
//! install site, check and repair, and repository setup while incomplete).
//! The menu loops until the operator exits or input ends.
//!
//! ## Architecture
//!
//! - `builder`: first-run answers to a new blueprint
//! - `reconciler`: project state detection and idempotent layout creation
//! - `installer`: module skeletons under the modules root
//! - `remote`: repository identifier and module path
//! - `site`: static site generation
//! - `menu`: menu choices and rendering
//!
//! All operator interaction goes through a `Prompter`, all external tools
//! through an `ExternalTools` gateway, so the whole session runs in tests
//! against in-memory input and a fake toolchain.
//!
use crate::common::toolchain::{ExternalTools, SystemTools};
use crate::common::ui::prompts::{self, Console, Prompter};
use crate::core::activity::ActivityLog;
use crate::core::blueprint::{Blueprint, ProjectKind};
use crate::core::config::{self, Settings};
use crate::core::error::Result;
use crate::core::store::ConfigStore;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub mod builder;
pub mod installer;
pub mod menu;
pub mod reconciler;
pub mod remote;
pub mod site;

use installer::ModuleInstaller;
use menu::MenuAction;
use reconciler::{detect_state, Outcome, ProjectState, Reconciler};
use site::SiteInstaller;

/// Arguments for a scaffolding session.
#[derive(Args, Debug)]
pub struct ScaffoldArgs {
    /// Project root to work in (defaults to the current directory).
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// # Handle Scaffold Session (`handle_scaffold`)
///
/// Resolves the project root, loads settings and runs one session on the
/// process's stdin/stdout with the system toolchain.
///
/// # Errors
///
/// Returns an `Err` if the project root cannot be resolved or the session
/// fails (notably `InvalidProjectKind` during first run).
pub fn handle_scaffold(args: ScaffoldArgs) -> Result<()> {
    let requested = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let root = requested
        .canonicalize()
        .with_context(|| format!("Project directory {:?} is not accessible", requested))?;
    info!("Programidex session in {:?}", root);

    let settings = config::load_settings();
    let tools = SystemTools::new(settings.tools.clone());
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    Session::new(&root, &settings, &tools).run(&mut console)
}

/// One interactive run against a project root.
pub struct Session<'a> {
    root: &'a Path,
    settings: &'a Settings,
    tools: &'a dyn ExternalTools,
    store: ConfigStore,
    log: ActivityLog,
}

impl<'a> Session<'a> {
    pub fn new(root: &'a Path, settings: &'a Settings, tools: &'a dyn ExternalTools) -> Self {
        Session {
            root,
            settings,
            tools,
            store: ConfigStore::for_project(root, settings),
            log: ActivityLog::for_project(root, settings),
        }
    }

    /// Runs the flow that matches the project's current state.
    pub fn run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<()> {
        let (state, blueprint) = detect_state(&self.store);
        debug!(
            "Detected project state {:?}; activity log at {:?}",
            state,
            self.log.path()
        );
        match blueprint {
            None if self.store.exists() => {
                warn!("Existing blueprint document is unreadable; treating project as new.");
                prompter.say("Existing configuration could not be read; starting fresh.");
                self.first_run(prompter)
            }
            None => self.first_run(prompter),
            Some(blueprint) => self.existing_project(state, blueprint, prompter),
        }
    }

    fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(self.root, self.settings, &self.log)
    }

    fn installer(&self) -> ModuleInstaller<'_> {
        ModuleInstaller::new(self.root, self.settings, &self.log)
    }

    fn site_installer(&self) -> SiteInstaller<'_> {
        SiteInstaller::new(self.root, self.settings, self.tools, &self.log)
    }

    fn report<P: Prompter + ?Sized>(prompter: &mut P, outcomes: &[Outcome]) {
        for outcome in outcomes {
            prompter.say(&outcome.to_string());
        }
    }

    fn first_run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<()> {
        prompter.say("Initialize a new Go project with programidex.");
        let answer = prompts::ask_trimmed(prompter, "Are you initializing an 'app' or a 'module'? ")?;
        let kind: ProjectKind = answer.parse()?;

        let repo = remote::setup_repository(self.root, self.tools, prompter)?;
        let default_path = remote::default_module_path(self.root, self.tools);
        let module_path = remote::prompt_module_path(prompter, &default_path)?;

        let mut blueprint =
            builder::build(kind.as_str(), &repo, &module_path, prompter, &self.settings.layout)?;
        builder::append_bookkeeping(&mut blueprint, self.settings);

        prompter.say("\nProposed configuration:");
        prompter.say(&blueprint.to_pretty_json()?);
        if !prompts::confirm(prompter, "\nProceed with directory creation and Go initialization?")? {
            prompter.say("Aborted.");
            self.log.record("User aborted initialization.");
            return Ok(());
        }

        let reconciler = self.reconciler();
        Self::report(prompter, &reconciler.apply(reconciler.plan_directories(&blueprint)));
        if let Some(outcome) = reconciler.initialize_manifest(&blueprint, self.tools) {
            Self::report(prompter, &[outcome]);
        }
        Self::report(prompter, &reconciler.apply(reconciler.plan_entrypoint(&blueprint)?));

        match self.store.save(&blueprint) {
            Ok(()) => self.log.record("Saved configuration."),
            Err(e) => {
                let message = format!("Failed to save configuration: {:#}", e);
                prompter.say(&message);
                self.log.record(&message);
            }
        }
        prompter.say(&format!(
            "\nInitialization complete. Config and log saved in {}",
            self.settings.bookkeeping_entry()
        ));

        if blueprint.kind == Some(ProjectKind::App)
            && blueprint.has_modules
            && prompts::confirm(prompter, "\nWould you like to install a module blueprint now?")?
        {
            self.installer().run(prompter, &self.store, &mut blueprint)?;
        }
        Ok(())
    }

    fn existing_project<P: Prompter + ?Sized>(
        &self,
        mut state: ProjectState,
        mut blueprint: Blueprint,
        prompter: &mut P,
    ) -> Result<()> {
        prompter.say("This project has already been initialized by programidex.");
        if state == ProjectState::InitializedIncomplete {
            prompter.say("GitHub namespace/repo is missing.");
            if prompts::confirm(prompter, "Would you like to set up GitHub now?")? {
                if self.set_up_repository(&mut blueprint, prompter)? {
                    state = ProjectState::InitializedComplete;
                }
            } else {
                prompter.say("You can set up GitHub later.");
                self.log.record("Skipped GitHub setup on re-initialization.");
            }
        } else {
            prompter.say("Nothing to update in config, but checking for missing directories or files...");
            self.log
                .record("Attempted re-initialization; checking for missing directories or files.");
        }
        self.repair(&blueprint, prompter)?;
        prompter.say("Repair (if needed) complete.");

        self.menu_loop(state, blueprint, prompter)
    }

    /// Records a repository identifier. Returns whether one was set.
    fn set_up_repository<P: Prompter + ?Sized>(
        &self,
        blueprint: &mut Blueprint,
        prompter: &mut P,
    ) -> Result<bool> {
        let repo = remote::setup_repository(self.root, self.tools, prompter)?;
        if repo.trim().is_empty() {
            prompter.say("No repository given; GitHub setup skipped.");
            self.log.record("Skipped GitHub setup on re-initialization.");
            return Ok(false);
        }
        blueprint.repo_identifier = repo;
        match self.store.save(blueprint) {
            Ok(()) => {
                self.log.record("GitHub repo set after re-initialization.");
                prompter.say("GitHub repo set.");
            }
            Err(e) => {
                let message = format!("Failed to save configuration: {:#}", e);
                prompter.say(&message);
                self.log.record(&message);
            }
        }
        Ok(true)
    }

    fn repair<P: Prompter + ?Sized>(&self, blueprint: &Blueprint, prompter: &mut P) -> Result<()> {
        let report = self.reconciler().reconcile(blueprint)?;
        if report.is_empty() {
            prompter.say("Nothing missing.");
        }
        Self::report(prompter, &report.outcomes);
        debug!(
            "Repair created {} entries, {} failures",
            report.created(),
            report.failures().count()
        );
        Ok(())
    }

    fn menu_loop<P: Prompter + ?Sized>(
        &self,
        mut state: ProjectState,
        mut blueprint: Blueprint,
        prompter: &mut P,
    ) -> Result<()> {
        loop {
            prompter.say(&menu::render_menu(state));
            let Some(input) = prompter.ask(&menu::menu_prompt(state))? else {
                prompter.say("Exiting.");
                return Ok(());
            };
            let Some(action) = menu::parse_menu_choice(&input, state) else {
                prompter.say("Invalid choice.");
                continue;
            };
            debug!("Menu action {:?}", action);
            match action {
                MenuAction::InstallModule => {
                    self.installer().run(prompter, &self.store, &mut blueprint)?;
                }
                MenuAction::ViewConfig => {
                    prompter.say("\nCurrent config:");
                    prompter.say(&blueprint.to_pretty_json()?);
                }
                MenuAction::Exit => {
                    prompter.say("Exiting.");
                    return Ok(());
                }
                MenuAction::InstallSite => {
                    self.site_installer().run(prompter, &self.store, &mut blueprint)?;
                }
                MenuAction::CheckAndRepair => {
                    self.repair(&blueprint, prompter)?;
                    prompter.say("Repair (if needed) complete.");
                }
                MenuAction::SetUpRepository => {
                    if self.set_up_repository(&mut blueprint, prompter)? {
                        state = ProjectState::InitializedComplete;
                    }
                }
            }
        }
    }
}
