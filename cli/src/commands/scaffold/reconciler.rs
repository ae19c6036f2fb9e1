//! # Programidex Blueprint Reconciler
//!
//! File: cli/src/commands/scaffold/reconciler.rs
//!
//! ## Overview
//!
//! Compares a `Blueprint` with what actually exists under the project root and
//! creates whatever is missing. Reconciliation is idempotent: it never removes
//! anything and never overwrites a file, so running it twice in a row plans
//! nothing the second time.
//!
//! The work is split into planning and applying:
//!
//! 1. `plan_directories` / `plan_entrypoint` inspect the filesystem and return
//!    a list of `Action`s.
//! 2. `apply` folds those actions into `Outcome`s. A failing action does not
//!    stop the remaining ones.
//!
//! Every outcome is recorded in the activity log; the caller reports them to
//! the operator.
//!
//! ## Project state
//!
//! `detect_state` classifies a project root:
//!
//! - `Uninitialized`: no readable blueprint document.
//! - `InitializedIncomplete`: a blueprint exists but has no repository identifier.
//! - `InitializedComplete`: a blueprint exists with a repository identifier.
//!
use crate::common::fs::io::{self, FileWrite};
use crate::common::toolchain::ExternalTools;
use crate::core::activity::ActivityLog;
use crate::core::blueprint::{is_contained_entry, Blueprint, ProjectKind};
use crate::core::config::{with_trailing_slash, Settings};
use crate::core::error::Result;
use crate::core::store::ConfigStore;
use crate::core::templating::{self, StarterTemplate};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lifecycle state of a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    Uninitialized,
    InitializedIncomplete,
    InitializedComplete,
}

/// Classifies the project behind `store` and hands back the loaded blueprint.
///
/// A document that exists but cannot be parsed counts as `Uninitialized`.
pub fn detect_state(store: &ConfigStore) -> (ProjectState, Option<Blueprint>) {
    match store.load_existing() {
        None => (ProjectState::Uninitialized, None),
        Some(blueprint) if blueprint.is_repo_configured() => {
            (ProjectState::InitializedComplete, Some(blueprint))
        }
        Some(blueprint) => (ProjectState::InitializedIncomplete, Some(blueprint)),
    }
}

/// A single filesystem change. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDirectory(PathBuf),
    CreateFile { path: PathBuf, content: String },
}

/// What happened when an `Action` (or the manifest step) was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(PathBuf),
    /// A file showed up between planning and applying; it was kept.
    Skipped(PathBuf),
    Failed { path: PathBuf, cause: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created(path) => write!(f, "Created {}", path.display()),
            Outcome::Skipped(path) => write!(f, "Kept existing {}", path.display()),
            Outcome::Failed { path, cause } => {
                write!(f, "Failed to create {}: {}", path.display(), cause)
            }
        }
    }
}

/// Outcomes of one `reconcile` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcomes: Vec<Outcome>,
}

impl ReconcileReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Created(_)))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Brings a project root in line with its blueprint.
pub struct Reconciler<'a> {
    root: &'a Path,
    settings: &'a Settings,
    log: &'a ActivityLog,
}

impl<'a> Reconciler<'a> {
    pub fn new(root: &'a Path, settings: &'a Settings, log: &'a ActivityLog) -> Self {
        Reconciler {
            root,
            settings,
            log,
        }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    /// One `CreateDirectory` per blueprint entry that is not a directory on disk.
    ///
    /// Entries that would resolve outside the root (absolute or containing
    /// `..`) are never planned; they are logged and left alone.
    pub fn plan_directories(&self, blueprint: &Blueprint) -> Vec<Action> {
        blueprint
            .directories
            .iter()
            .filter(|entry| {
                let contained = is_contained_entry(entry);
                if !contained {
                    warn!("Ignoring directory entry outside the project: {:?}", entry);
                    self.log
                        .record(&format!("Ignored directory entry outside the project: {}", entry));
                }
                contained
            })
            .filter(|entry| !self.root.join(entry.as_str()).is_dir())
            .map(|entry| Action::CreateDirectory(PathBuf::from(entry)))
            .collect()
    }

    /// # Plan Entrypoint (`plan_entrypoint`)
    ///
    /// Applications get `<commands_root><name>/main.go`, where `<name>` is the
    /// last segment of the module path or, failing that, the project directory
    /// name. Modules have no entrypoint and plan nothing.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the starter template fails to render.
    pub fn plan_entrypoint(&self, blueprint: &Blueprint) -> Result<Vec<Action>> {
        if blueprint.kind != Some(ProjectKind::App) {
            return Ok(Vec::new());
        }
        let name = blueprint.entrypoint_name(&io::dir_name(self.root));
        let dir = PathBuf::from(format!(
            "{}{}/",
            with_trailing_slash(&self.settings.layout.commands_root),
            name
        ));
        let main = dir.join(StarterTemplate::AppMain.file_name());

        let mut actions = Vec::new();
        if !self.root.join(&dir).is_dir() {
            actions.push(Action::CreateDirectory(dir));
        }
        if !self.root.join(&main).exists() {
            let content =
                templating::render_starter(StarterTemplate::AppMain, &[("app_name", name.as_str())])?;
            actions.push(Action::CreateFile {
                path: main,
                content,
            });
        }
        Ok(actions)
    }

    /// Applies `actions` in order. Each action yields exactly one outcome.
    pub fn apply(&self, actions: Vec<Action>) -> Vec<Outcome> {
        actions
            .into_iter()
            .fold(Vec::new(), |mut outcomes, action| {
                let outcome = self.apply_one(action);
                self.log.record(&outcome.to_string());
                outcomes.push(outcome);
                outcomes
            })
    }

    fn apply_one(&self, action: Action) -> Outcome {
        match action {
            Action::CreateDirectory(path) => match io::ensure_dir_exists(&self.root.join(&path)) {
                Ok(()) => Outcome::Created(path),
                Err(e) => Outcome::Failed {
                    path,
                    cause: format!("{:#}", e),
                },
            },
            Action::CreateFile { path, content } => {
                match io::create_file_if_missing(&self.root.join(&path), &content) {
                    Ok(FileWrite::Created) => Outcome::Created(path),
                    Ok(FileWrite::AlreadyExists) => Outcome::Skipped(path),
                    Err(e) => Outcome::Failed {
                        path,
                        cause: format!("{:#}", e),
                    },
                }
            }
        }
    }

    /// Plans and applies directories first, then the application entrypoint.
    pub fn reconcile(&self, blueprint: &Blueprint) -> Result<ReconcileReport> {
        let mut actions = self.plan_directories(blueprint);
        actions.extend(self.plan_entrypoint(blueprint)?);
        debug!("Reconcile plan for {:?}: {:?}", self.root, actions);
        Ok(ReconcileReport {
            outcomes: self.apply(actions),
        })
    }

    /// # Initialize Manifest (`initialize_manifest`)
    ///
    /// Runs the toolchain's module initialization when the project has a
    /// module path and no `go.mod` yet. Returns `None` when nothing was
    /// attempted.
    pub fn initialize_manifest(
        &self,
        blueprint: &Blueprint,
        tools: &dyn ExternalTools,
    ) -> Option<Outcome> {
        let manifest = PathBuf::from("go.mod");
        let module_path = blueprint.module_path.trim();
        if module_path.is_empty() || self.root.join(&manifest).exists() {
            debug!("Skipping manifest initialization in {:?}", self.root);
            return None;
        }
        let outcome = match tools.initialize_module_manifest(self.root, module_path) {
            Ok(()) => Outcome::Created(manifest),
            Err(e) => Outcome::Failed {
                path: manifest,
                cause: format!("{:#}", e),
            },
        };
        self.log.record(&outcome.to_string());
        Some(outcome)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::toolchain::fake::{FakeTools, ToolCall};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
        settings: Settings,
        log: ActivityLog,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let settings = Settings::default();
            let log = ActivityLog::for_project(dir.path(), &settings);
            Fixture { dir, settings, log }
        }

        fn reconciler(&self) -> Reconciler<'_> {
            Reconciler::new(self.dir.path(), &self.settings, &self.log)
        }

        fn log_text(&self) -> String {
            fs::read_to_string(self.log.path()).unwrap_or_default()
        }
    }

    fn app(module_path: &str) -> Blueprint {
        Blueprint {
            kind: Some(ProjectKind::App),
            has_site: true,
            directories: vec!["cmd/".into(), "internal/".into(), "docs/".into()],
            module_path: module_path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_state() {
        let fx = Fixture::new();
        let store = ConfigStore::for_project(fx.dir.path(), &fx.settings);
        assert_eq!(detect_state(&store).0, ProjectState::Uninitialized);

        let mut bp = app("");
        store.save(&bp).unwrap();
        let (state, loaded) = detect_state(&store);
        assert_eq!(state, ProjectState::InitializedIncomplete);
        assert_eq!(loaded, Some(bp.clone()));

        bp.repo_identifier = "acme/widgets".into();
        store.save(&bp).unwrap();
        assert_eq!(detect_state(&store).0, ProjectState::InitializedComplete);
    }

    #[test]
    fn test_entries_outside_root_are_never_created() -> Result<()> {
        let fx = Fixture::new();
        let root = fx.dir.path();
        let escape = format!("../{}-escape/", io::dir_name(root));
        let mut bp = app("example.com/acme/..");
        bp.directories = vec![escape.clone(), "/abs-entry/".into(), "docs/".into()];

        let report = fx.reconciler().reconcile(&bp)?;
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Created("docs/".into()),
                Outcome::Created(PathBuf::from(format!("cmd/{}/", io::dir_name(root)))),
                Outcome::Created(PathBuf::from(format!(
                    "cmd/{}/main.go",
                    io::dir_name(root)
                ))),
            ]
        );
        assert!(!root.join(&escape).exists());
        assert!(!Path::new("/abs-entry").exists());
        assert!(fx
            .log_text()
            .contains("Ignored directory entry outside the project: /abs-entry/"));
        Ok(())
    }

    #[test]
    fn test_malformed_document_is_uninitialized() {
        let fx = Fixture::new();
        let store = ConfigStore::for_project(fx.dir.path(), &fx.settings);
        fs::create_dir_all(fx.dir.path().join(".dex")).unwrap();
        fs::write(store.primary_path(), "{ not json").unwrap();
        assert_eq!(detect_state(&store), (ProjectState::Uninitialized, None));
    }

    #[test]
    fn test_reconcile_creates_missing_layout_and_entrypoint() -> Result<()> {
        let fx = Fixture::new();
        let root = fx.dir.path();
        fs::create_dir(root.join("docs"))?;

        let report = fx.reconciler().reconcile(&app("github.com/acme/widgets"))?;
        assert_eq!(report.failures().count(), 0);
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Created("cmd/".into()),
                Outcome::Created("internal/".into()),
                Outcome::Created("cmd/widgets/".into()),
                Outcome::Created("cmd/widgets/main.go".into()),
            ]
        );
        let main = fs::read_to_string(root.join("cmd/widgets/main.go"))?;
        assert!(main.contains("Welcome to widgets!"));
        assert!(fx.log_text().contains("] Created internal/\n"));
        Ok(())
    }

    #[test]
    fn test_reconcile_twice_plans_nothing() -> Result<()> {
        let fx = Fixture::new();
        let bp = app("");
        let first = fx.reconciler().reconcile(&bp)?;
        assert!(!first.is_empty());

        let r = fx.reconciler();
        assert!(r.plan_directories(&bp).is_empty());
        assert!(r.plan_entrypoint(&bp)?.is_empty());
        assert!(r.reconcile(&bp)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_entrypoint_falls_back_to_directory_name() -> Result<()> {
        let fx = Fixture::new();
        let name = io::dir_name(fx.dir.path());
        let actions = fx.reconciler().plan_entrypoint(&app(""))?;
        assert_eq!(
            actions[0],
            Action::CreateDirectory(PathBuf::from(format!("cmd/{}/", name)))
        );
        Ok(())
    }

    #[test]
    fn test_module_has_no_entrypoint() -> Result<()> {
        let fx = Fixture::new();
        let bp = Blueprint {
            kind: Some(ProjectKind::Module),
            directories: vec!["widgets/".into()],
            ..Default::default()
        };
        assert!(fx.reconciler().plan_entrypoint(&bp)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_existing_entrypoint_is_never_overwritten() -> Result<()> {
        let fx = Fixture::new();
        let root = fx.dir.path();
        fs::create_dir_all(root.join("cmd/widgets"))?;
        fs::write(root.join("cmd/widgets/main.go"), "custom")?;

        fx.reconciler().reconcile(&app("example.com/widgets"))?;
        assert_eq!(fs::read_to_string(root.join("cmd/widgets/main.go"))?, "custom");

        // A file appearing after planning is kept as well.
        let outcomes = fx.reconciler().apply(vec![Action::CreateFile {
            path: "cmd/widgets/main.go".into(),
            content: "replacement".into(),
        }]);
        assert_eq!(outcomes, vec![Outcome::Skipped("cmd/widgets/main.go".into())]);
        assert_eq!(fs::read_to_string(root.join("cmd/widgets/main.go"))?, "custom");
        Ok(())
    }

    #[test]
    fn test_failed_action_does_not_stop_the_rest() -> Result<()> {
        let fx = Fixture::new();
        let root = fx.dir.path();
        fs::write(root.join("internal"), "a file in the way")?;

        let outcomes = fx.reconciler().apply(vec![
            Action::CreateDirectory("internal/".into()),
            Action::CreateDirectory("docs/".into()),
        ]);
        assert!(outcomes[0].is_failure());
        assert_eq!(outcomes[1], Outcome::Created("docs/".into()));
        assert!(fx.log_text().contains("Failed to create internal/"));
        Ok(())
    }

    #[test]
    fn test_initialize_manifest_conditions() -> Result<()> {
        let fx = Fixture::new();
        let tools = FakeTools::default();
        let r = fx.reconciler();

        assert_eq!(r.initialize_manifest(&app(""), &tools), None);
        assert!(tools.calls().is_empty());

        let outcome = r.initialize_manifest(&app("example.com/widgets"), &tools);
        assert_eq!(outcome, Some(Outcome::Created("go.mod".into())));
        assert_eq!(
            tools.calls(),
            vec![ToolCall::InitManifest(
                fx.dir.path().to_path_buf(),
                "example.com/widgets".into()
            )]
        );

        fs::write(fx.dir.path().join("go.mod"), "module example.com/widgets\n")?;
        assert_eq!(r.initialize_manifest(&app("example.com/widgets"), &tools), None);
        assert_eq!(tools.calls().len(), 1);
        Ok(())
    }

    #[test]
    fn test_initialize_manifest_failure_is_reported() {
        let fx = Fixture::new();
        let outcome = fx
            .reconciler()
            .initialize_manifest(&app("example.com/widgets"), &FakeTools::failing());
        assert!(matches!(outcome, Some(Outcome::Failed { .. })));
        assert!(fx.log_text().contains("Failed to create go.mod"));
    }
}
