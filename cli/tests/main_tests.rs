//! # Programidex Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `programidex` binary: standard flags and the
//! handling of an unusable project directory.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    programidex_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_flag() {
    programidex_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_rejected() {
    programidex_cmd()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}

/// A missing project directory is reported but is not an invalid project kind,
/// so the process still exits with 0.
#[test]
fn test_missing_directory_reports_error() {
    programidex_cmd()
        .args(["-C", "/definitely/not/a/programidex/project"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: Project directory"));
}
