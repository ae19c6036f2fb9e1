//! # Programidex Commands
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Programidex has no subcommands: every invocation is one interactive
//! scaffolding session. The session, its flows and their building blocks live
//! in `scaffold`.
//!

/// The interactive scaffolding session (first run, repair, menu).
pub mod scaffold;
