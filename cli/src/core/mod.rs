//! # Programidex Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the components that define *what* a project is and
//! how its state is kept between runs: the blueprint model, its persistence,
//! the activity log, the tool settings, error types and starter templates.
//!
//! ## Architecture
//!
//! - `activity`: append-only `[component][timestamp] message` project log
//! - `blueprint`: the `Blueprint` entity and `ProjectKind`
//! - `config`: tool settings (bookkeeping paths, layout roots, tool binaries)
//! - `error`: error types and the `Result` alias
//! - `store`: the configuration store that owns the on-disk blueprint
//! - `templating`: starter-file boilerplate rendered with Tera
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::Settings;
//! use crate::core::store::ConfigStore;
//!
//! let settings = Settings::default();
//! let store = ConfigStore::for_project(&root, &settings);
//! let blueprint = store.load();
//! ```
//!
pub mod activity;
pub mod blueprint;
pub mod config;
pub mod error;
pub mod store;
pub mod templating;
