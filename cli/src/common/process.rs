//! # Programidex Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Blocking wrappers around `std::process::Command` for the handful of
//! external tools programidex drives (`git`, `go`, `hugo`).
//!
//! - **`run_command_capture`**: runs a command with piped output and returns
//!   trimmed stdout on success. Used for queries such as
//!   `git remote get-url origin`.
//! - **`run_command_streamed`**: runs a command with inherited stdout/stderr so
//!   the operator sees the tool's own output. Used for `go mod init` and
//!   `hugo new site`.
//!
//! Both map a failure to launch or a non-zero exit into
//! `ProgramidexError::ExternalCommand`, carrying the command line, the status
//! and whatever output was captured. Nothing here retries.
//!
//! ```rust
//! use crate::common::process;
//!
//! let url = process::run_command_capture("git", &["remote", "get-url", "origin"], Some(root))?;
//! process::run_command_streamed("go", &["mod", "init", "example.com/app"], Some(root))?;
//! ```
//!
use crate::core::error::{ProgramidexError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_command(program: &str, args: &[&str], cwd: Option<&Path>) -> Command {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    command
}

/// # Run Command Capture (`run_command_capture`)
///
/// Runs `program args...` and returns its stdout with surrounding whitespace
/// trimmed.
///
/// # Errors
///
/// `ProgramidexError::ExternalCommand` if the program cannot be started or
/// exits unsuccessfully; the captured stderr is included.
pub fn run_command_capture(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let cmd_line = describe(program, args);
    debug!("Running (captured): {}", cmd_line);

    let output = build_command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ProgramidexError::ExternalCommand {
            cmd: cmd_line.clone(),
            status: "failed to start".to_string(),
            output: e.to_string(),
        })?;

    debug!(
        "'{}' finished: status={}, stdout='{}', stderr='{}'",
        cmd_line,
        output.status,
        String::from_utf8_lossy(&output.stdout).trim(),
        String::from_utf8_lossy(&output.stderr).trim()
    );

    if !output.status.success() {
        anyhow::bail!(ProgramidexError::ExternalCommand {
            cmd: cmd_line,
            status: output.status.to_string(),
            output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// # Run Command Streamed (`run_command_streamed`)
///
/// Runs `program args...` with stdout and stderr inherited from programidex,
/// waiting for it to finish.
///
/// # Errors
///
/// `ProgramidexError::ExternalCommand` if the program cannot be started or
/// exits unsuccessfully.
pub fn run_command_streamed(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let cmd_line = describe(program, args);
    debug!("Running (streamed): {}", cmd_line);

    let status = build_command(program, args, cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ProgramidexError::ExternalCommand {
            cmd: cmd_line.clone(),
            status: "failed to start".to_string(),
            output: e.to_string(),
        })?;

    if !status.success() {
        anyhow::bail!(ProgramidexError::ExternalCommand {
            cmd: cmd_line,
            status: status.to_string(),
            output: String::new(),
        });
    }
    Ok(())
}
