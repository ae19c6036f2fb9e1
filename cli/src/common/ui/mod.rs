//! # Programidex UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction for the interactive scaffolder. Everything is plain,
//! line-oriented text so that the whole session can be scripted through
//! stdin.
//!
//! - **`prompts`**: the `Prompter` trait, the `Console` implementation, and the
//!   yes/no and default-value helpers built on top of it.
//!

pub mod prompts;
