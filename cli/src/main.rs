//! # Programidex Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `programidex` binary, an interactive scaffolder for Go
//! projects. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the diagnostic log based on verbosity flags
//! - Running the scaffolding session and mapping its result to an exit code
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold (or repair) the project in the current directory
//! programidex
//!
//! # Work on another directory with diagnostics on stderr
//! programidex -vv -C ~/src/widgets
//! ```
//!
//! ## Exit status
//!
//! An unrecognised project kind during first run is the only failure that
//! exits with `1`. Every other error is reported on stderr and the process
//! still exits with `0`.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "programidex",
    about = "Interactive scaffolder for Go apps and modules",
    long_about = "Initializes a Go project layout from a short interview, records it in\n\
                  .dex/.programidex.json, and repairs or extends it on later runs.",
    version
)]
struct Cli {
    #[command(flatten)]
    scaffold: commands::scaffold::ScaffoldArgs,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::scaffold::handle_scaffold(cli.scaffold) {
        tracing::error!("Session failed: {:?}", e);
        eprintln!("Error: {}", e);
        if crate::core::error::is_invalid_project_kind(&e) {
            std::process::exit(1);
        }
    }
}
