//! # Programidex Integration Test Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs the
//! compiled `programidex` binary inside a temporary project directory with a
//! settings file that points every external tool at a binary that does not
//! exist, so no test depends on `git`, `go` or `hugo` being installed.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Command for the compiled `programidex` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn programidex_cmd() -> Command {
    Command::cargo_bin("programidex").expect("Failed to find programidex binary for testing")
}

/// A temporary project directory plus an isolated settings file.
pub struct Sandbox {
    pub project: TempDir,
    settings: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let project = tempdir().expect("Failed to create project dir");
        let settings = tempdir().expect("Failed to create settings dir");
        fs::write(
            settings.path().join("config.toml"),
            "[tools]\n\
             git = \"programidex-test-missing-git\"\n\
             go = \"programidex-test-missing-go\"\n\
             hugo = \"programidex-test-missing-hugo\"\n",
        )
        .expect("Failed to write settings file");
        Sandbox { project, settings }
    }

    pub fn root(&self) -> &Path {
        self.project.path()
    }

    /// Project directory name, which defaults repository and entrypoint names.
    pub fn name(&self) -> String {
        self.root()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join(".dex/.programidex.json")
    }

    pub fn log_text(&self) -> String {
        fs::read_to_string(self.root().join(".dex/dex.log")).unwrap_or_default()
    }

    pub fn config_json(&self) -> serde_json::Value {
        let text = fs::read_to_string(self.config_path()).expect("config should exist");
        serde_json::from_str(&text).expect("config should be valid JSON")
    }

    /// `programidex -C <project>` with the isolated settings and `stdin`.
    pub fn run(&self, stdin: impl Into<Vec<u8>>) -> Command {
        let mut cmd = programidex_cmd();
        cmd.arg("-C")
            .arg(self.root())
            .env("PROGRAMIDEX_CONFIG", self.settings.path().join("config.toml"))
            .env_remove("RUST_LOG")
            .write_stdin(stdin);
        cmd
    }
}
