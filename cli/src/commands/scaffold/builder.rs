//! # Programidex Blueprint Builder
//!
//! File: cli/src/commands/scaffold/builder.rs
//!
//! ## Overview
//!
//! Turns first-run answers into a brand-new `Blueprint`. The work is split in
//! two so the layout rules can be tested without any terminal:
//!
//! - `build` parses the project kind and asks the one kind-specific question
//!   (does the app support modules? / what is the module called?).
//! - `assemble` is the pure part: kind answers + repository + module path +
//!   layout roots in, blueprint out.
//!
//! Layout seeded per kind:
//!
//! | kind   | directories                                                     |
//! |--------|-----------------------------------------------------------------|
//! | app    | `cmd/`, `internal/`, `docs/`, `hugo/` (+ `modules/` if chosen)  |
//! | module | `<name>/`, `docs/`, `hugo/`                                     |
//!
//! Bookkeeping directories are *not* added here; `append_bookkeeping` is a
//! separate step owned by the first-run flow.
//!
use crate::commands::scaffold::installer::validate_module_name;
use crate::common::ui::prompts::{self, Prompter};
use crate::core::blueprint::{Blueprint, ProjectKind};
use crate::core::config::{with_trailing_slash, LayoutConfig, Settings};
use crate::core::error::{ProgramidexError, Result};
use tracing::debug;

/// Kind-specific answers collected during first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindAnswers {
    App { with_modules: bool },
    Module { name: String },
}

impl KindAnswers {
    pub fn kind(&self) -> ProjectKind {
        match self {
            KindAnswers::App { .. } => ProjectKind::App,
            KindAnswers::Module { .. } => ProjectKind::Module,
        }
    }
}

/// # Assemble Blueprint (`assemble`)
///
/// Builds the blueprint for a new project from already-collected answers.
/// The resulting `directories` contain the base set for the kind plus the
/// conditional modules root, without duplicates.
pub fn assemble(
    answers: &KindAnswers,
    repo_identifier: &str,
    module_path: &str,
    layout: &LayoutConfig,
) -> Blueprint {
    let mut blueprint = Blueprint {
        kind: Some(answers.kind()),
        has_site: true,
        repo_identifier: repo_identifier.trim().to_string(),
        module_path: module_path.trim().to_string(),
        ..Default::default()
    };

    match answers {
        KindAnswers::App { with_modules } => {
            for root in [
                &layout.commands_root,
                &layout.internal_root,
                &layout.docs_root,
                &layout.site_root,
            ] {
                blueprint.add_directory(root);
            }
            if *with_modules {
                blueprint.add_directory(&layout.modules_root);
                blueprint.has_modules = true;
            }
        }
        KindAnswers::Module { name } => {
            blueprint.add_directory(&with_trailing_slash(name.trim()));
            blueprint.add_directory(&layout.docs_root);
            blueprint.add_directory(&layout.site_root);
        }
    }
    debug!("Assembled blueprint: {:?}", blueprint);
    blueprint
}

/// # Build Blueprint (`build`)
///
/// Parses `kind`, asks the kind-specific question and assembles the blueprint.
///
/// # Errors
///
/// - `InvalidProjectKind` when `kind` is neither `app` nor `module`; no
///   question is asked in that case.
/// - `InvalidModuleName` when input ends before a usable module name is given.
pub fn build<P: Prompter + ?Sized>(
    kind: &str,
    repo_identifier: &str,
    module_path: &str,
    prompter: &mut P,
    layout: &LayoutConfig,
) -> Result<Blueprint> {
    let kind: ProjectKind = kind.parse()?;
    let answers = ask_kind_questions(kind, prompter)?;
    Ok(assemble(&answers, repo_identifier, module_path, layout))
}

fn ask_kind_questions<P: Prompter + ?Sized>(
    kind: ProjectKind,
    prompter: &mut P,
) -> Result<KindAnswers> {
    match kind {
        ProjectKind::App => {
            let with_modules = prompts::confirm(prompter, "Will this app have modules?")?;
            Ok(KindAnswers::App { with_modules })
        }
        ProjectKind::Module => loop {
            let Some(answer) = prompter.ask("Enter the module name: ")? else {
                anyhow::bail!(ProgramidexError::InvalidModuleName(String::new()));
            };
            let name = answer.trim();
            match validate_module_name(name) {
                Ok(()) => return Ok(KindAnswers::Module { name: name.to_string() }),
                Err(e) => prompter.say(&e.to_string()),
            }
        },
    }
}

/// Appends the legacy and current bookkeeping directories, each at most once.
pub fn append_bookkeeping(blueprint: &mut Blueprint, settings: &Settings) {
    blueprint.add_directory(&settings.legacy_entry());
    blueprint.add_directory(&settings.bookkeeping_entry());
}
