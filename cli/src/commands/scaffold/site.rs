//! # Programidex Static Site Install
//!
//! File: cli/src/commands/scaffold/site.rs
//!
//! ## Overview
//!
//! Generates a static documentation site inside the project with the site
//! generator from the toolchain gateway. The target directory is resolved
//! against the project root (the nearest ancestor holding the bookkeeping
//! directory) and must be absent or empty. The operator sees the resolved
//! target and confirms before the generator runs.
//!
//! A generated site is recorded in the session's blueprint (`with_hugo` and
//! its directory entry), which is then persisted through the session's store.
//!
use crate::common::fs::io;
use crate::common::toolchain::ExternalTools;
use crate::common::ui::prompts::{self, Prompter};
use crate::core::activity::ActivityLog;
use crate::core::blueprint::{is_contained_entry, Blueprint};
use crate::core::config::{with_trailing_slash, Settings};
use crate::core::error::Result;
use crate::core::store::ConfigStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walks upward from `start` to the first directory containing `bookkeeping_dir`.
pub fn find_project_root(start: &Path, bookkeeping_dir: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(bookkeeping_dir).is_dir())
        .map(Path::to_path_buf)
}

pub struct SiteInstaller<'a> {
    root: &'a Path,
    settings: &'a Settings,
    tools: &'a dyn ExternalTools,
    log: &'a ActivityLog,
}

impl<'a> SiteInstaller<'a> {
    pub fn new(
        root: &'a Path,
        settings: &'a Settings,
        tools: &'a dyn ExternalTools,
        log: &'a ActivityLog,
    ) -> Self {
        SiteInstaller {
            root,
            settings,
            tools,
            log,
        }
    }

    fn refuse<P: Prompter + ?Sized>(&self, prompter: &mut P, shown: &str, logged: &str) {
        prompter.say(shown);
        self.log.record(logged);
    }

    /// Resolves and checks the target directory. `None` means the install was
    /// refused and already reported.
    fn resolve_target<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        dir: &str,
    ) -> Option<PathBuf> {
        if !is_contained_entry(dir) {
            self.refuse(
                prompter,
                &format!("Invalid site directory '{}'. Aborting.", dir),
                &format!("Hugo site creation aborted: invalid directory {}.", dir),
            );
            return None;
        }
        let Some(project_root) = find_project_root(self.root, &self.settings.bookkeeping.directory)
        else {
            self.refuse(
                prompter,
                &format!(
                    "Could not find project root (missing {} directory). Aborting.",
                    self.settings.bookkeeping.directory
                ),
                "Hugo site creation aborted: project root not found.",
            );
            return None;
        };

        let target = project_root.join(dir);
        if target.exists() {
            match io::is_dir_empty(&target) {
                Ok(true) => {}
                Ok(false) => {
                    self.refuse(
                        prompter,
                        &format!(
                            "Directory '{}' is not empty. Aborting Hugo site creation.",
                            target.display()
                        ),
                        &format!("Hugo site creation aborted: {} not empty.", target.display()),
                    );
                    return None;
                }
                Err(e) => {
                    debug!("Site target unreadable: {:#}", e);
                    self.refuse(
                        prompter,
                        &format!("Could not read directory '{}'. Aborting.", target.display()),
                        &format!(
                            "Hugo site creation aborted: could not read {}.",
                            target.display()
                        ),
                    );
                    return None;
                }
            }
        }
        Some(target)
    }

    /// # Install Static Site (`run`)
    ///
    /// Asks for the site directory, confirms, and generates the site there.
    /// Returns whether a site was created. Refusals, a declined confirmation
    /// and generator failures are reported to the operator and recorded in
    /// the activity log; they are not errors. `blueprint` is only changed
    /// after the generator succeeds.
    pub fn run<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        store: &ConfigStore,
        blueprint: &mut Blueprint,
    ) -> Result<bool> {
        let default_dir = self.settings.layout.site_root.trim_end_matches('/');
        let dir = prompts::ask_with_default(
            prompter,
            "Enter the directory name for the Hugo site",
            default_dir,
        )?;
        let Some(target) = self.resolve_target(prompter, &dir) else {
            return Ok(false);
        };

        prompter.say(&format!("\nHugo site to be created in '{}'.", target.display()));
        if !prompts::confirm(prompter, "Proceed with Hugo site creation?")? {
            self.refuse(
                prompter,
                "Aborted Hugo site creation.",
                "Hugo site creation aborted by user.",
            );
            return Ok(false);
        }

        prompter.say(&format!("Creating Hugo site in '{}'...", target.display()));
        if let Err(e) = self.tools.create_static_site(&target) {
            let message = format!("Failed to create Hugo site: {:#}", e);
            self.refuse(prompter, &message, &message);
            return Ok(false);
        }
        let message = format!("Hugo site created in '{}'.", target.display());
        prompter.say(&message);
        self.log.record(&message);

        blueprint.has_site = true;
        match pathdiff::diff_paths(&target, self.root) {
            Some(entry) if is_contained_entry(&entry.to_string_lossy()) => {
                blueprint.add_directory(&with_trailing_slash(&entry.to_string_lossy()));
            }
            _ => debug!("Site {:?} lies outside {:?}; not listed", target, self.root),
        }
        if let Err(e) = store.save(blueprint) {
            let message = format!("Failed to save configuration: {:#}", e);
            prompter.say(&message);
            self.log.record(&message);
        }
        Ok(true)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::toolchain::fake::{FakeTools, ToolCall};
    use crate::common::ui::prompts::Console;
    use crate::core::blueprint::ProjectKind;
    use std::fs;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    struct Fixture {
        dir: TempDir,
        settings: Settings,
        log: ActivityLog,
        store: ConfigStore,
        blueprint: Blueprint,
    }

    impl Fixture {
        fn initialized() -> Self {
            let dir = tempdir().unwrap();
            let settings = Settings::default();
            let log = ActivityLog::for_project(dir.path(), &settings);
            let store = ConfigStore::for_project(dir.path(), &settings);
            let blueprint = Blueprint {
                kind: Some(ProjectKind::Module),
                directories: vec!["widgets/".into(), ".dex/".into()],
                ..Default::default()
            };
            store.save(&blueprint).unwrap();
            Fixture {
                dir,
                settings,
                log,
                store,
                blueprint,
            }
        }

        fn install(&mut self, tools: &FakeTools, input: &str) -> Result<bool> {
            self.install_from(self.dir.path().to_path_buf(), tools, input)
        }

        fn install_from(&mut self, root: PathBuf, tools: &FakeTools, input: &str) -> Result<bool> {
            SiteInstaller::new(&root, &self.settings, tools, &self.log).run(
                &mut console(input),
                &self.store,
                &mut self.blueprint,
            )
        }

        fn log_text(&self) -> String {
            fs::read_to_string(self.log.path()).unwrap_or_default()
        }
    }

    #[test]
    fn test_find_project_root_walks_upward() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_root(&nested, ".dex"), None);

        fs::create_dir(dir.path().join(".dex")).unwrap();
        assert_eq!(
            find_project_root(&nested, ".dex"),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_install_site_records_directory() -> Result<()> {
        let mut fx = Fixture::initialized();
        let tools = FakeTools::default();

        assert!(fx.install(&tools, "\ny\n")?);
        assert_eq!(
            tools.calls(),
            vec![ToolCall::CreateSite(fx.dir.path().join("hugo"))]
        );
        assert!(fx.blueprint.has_site);
        assert_eq!(fx.blueprint.directories, vec!["widgets/", ".dex/", "hugo/"]);
        assert_eq!(fx.store.load(), fx.blueprint);
        Ok(())
    }

    #[test]
    fn test_install_site_keeps_unsaved_changes() -> Result<()> {
        let mut fx = Fixture::initialized();
        fx.blueprint.repo_identifier = "acme/widgets".into();

        assert!(fx.install(&FakeTools::default(), "\ny\n")?);
        assert_eq!(fx.blueprint.repo_identifier, "acme/widgets");
        assert_eq!(fx.store.load().repo_identifier, "acme/widgets");
        Ok(())
    }

    #[test]
    fn test_declined_confirmation_runs_nothing() -> Result<()> {
        let mut fx = Fixture::initialized();
        let before = fx.blueprint.clone();
        let tools = FakeTools::default();

        assert!(!fx.install(&tools, "\nn\n")?);
        assert!(tools.calls().is_empty());
        assert_eq!(fx.blueprint, before);
        assert!(!fx.dir.path().join("hugo").exists());
        assert!(fx.log_text().contains("Hugo site creation aborted by user."));
        Ok(())
    }

    #[test]
    fn test_install_site_from_nested_directory() -> Result<()> {
        let mut fx = Fixture::initialized();
        let nested = fx.dir.path().join("widgets");
        fs::create_dir_all(&nested)?;
        let tools = FakeTools::default();

        fx.install_from(nested, &tools, "site\ny\n")?;
        assert_eq!(
            tools.calls(),
            vec![ToolCall::CreateSite(fx.dir.path().join("site"))]
        );
        Ok(())
    }

    #[test]
    fn test_non_empty_target_is_refused() -> Result<()> {
        let mut fx = Fixture::initialized();
        fs::create_dir_all(fx.dir.path().join("hugo"))?;
        fs::write(fx.dir.path().join("hugo/config.toml"), "")?;
        let tools = FakeTools::default();

        assert!(!fx.install(&tools, "\ny\n")?);
        assert!(tools.calls().is_empty());
        assert!(fx.log_text().contains("not empty"));
        Ok(())
    }

    #[test]
    fn test_directory_outside_project_is_refused() -> Result<()> {
        let mut fx = Fixture::initialized();
        let tools = FakeTools::default();

        assert!(!fx.install(&tools, "../elsewhere\ny\n")?);
        assert!(!fx.install(&tools, "/tmp/site\ny\n")?);
        assert!(tools.calls().is_empty());
        assert!(fx.log_text().contains("invalid directory ../elsewhere"));
        Ok(())
    }

    #[test]
    fn test_missing_project_root_aborts() -> Result<()> {
        let dir = tempdir()?;
        let settings = Settings::default();
        let log = ActivityLog::new(dir.path().join("dex.log"), "programidex");
        let store = ConfigStore::for_project(dir.path(), &settings);
        let tools = FakeTools::default();

        let created = SiteInstaller::new(dir.path(), &settings, &tools, &log).run(
            &mut console("\ny\n"),
            &store,
            &mut Blueprint::default(),
        )?;
        assert!(!created);
        assert!(tools.calls().is_empty());
        assert!(fs::read_to_string(log.path())?.contains("project root not found"));
        Ok(())
    }

    #[test]
    fn test_generator_failure_leaves_blueprint_alone() -> Result<()> {
        let mut fx = Fixture::initialized();
        let before = fx.blueprint.clone();

        assert!(!fx.install(&FakeTools::failing(), "\ny\n")?);
        assert_eq!(fx.blueprint, before);
        let saved = fx.store.load();
        assert!(!saved.has_site);
        assert!(!saved.contains_directory("hugo/"));
        Ok(())
    }
}
