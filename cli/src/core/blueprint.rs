//! # Programidex Blueprint Model
//!
//! File: cli/src/core/blueprint.rs
//!
//! ## Overview
//!
//! The `Blueprint` is the single persisted entity of programidex: the intended
//! directory layout of a project plus its provenance metadata (repository
//! identifier and Go module path). It is built once on first run, persisted by
//! the configuration store, and reloaded on every later invocation.
//!
//! ## Document Format
//!
//! The on-disk field names are fixed:
//!
//! ```json
//! {
//!   "type": "app",
//!   "with_modules": true,
//!   "with_hugo": true,
//!   "directories": ["cmd/", "internal/", "docs/", "hugo/", "modules/", ".programidex/", ".dex/"],
//!   "github_repo": "acme/widgets",
//!   "go_module": "github.com/acme/widgets"
//! }
//! ```
//!
//! An unset kind is written as `""`. Unknown kind strings read back as unset.
//!
use crate::core::error::ProgramidexError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Component, Path};
use std::{fmt, str::FromStr};

/// The two mutually exclusive project styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// A standalone application (`cmd/`, `internal/`, optional `modules/`).
    App,
    /// A single reusable module rooted at `<name>/`.
    Module,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::App => "app",
            ProjectKind::Module => "module",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = ProgramidexError;

    /// Parses an operator answer; surrounding whitespace and case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "app" => Ok(ProjectKind::App),
            "module" => Ok(ProjectKind::Module),
            other => Err(ProgramidexError::InvalidProjectKind(other.to_string())),
        }
    }
}

/// # Blueprint (`Blueprint`)
///
/// Persisted description of a project's layout. `Blueprint::default()` is the
/// zero value the store hands back for missing or malformed documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Project kind; immutable once persisted.
    #[serde(rename = "type", default, with = "kind_field")]
    pub kind: Option<ProjectKind>,
    /// Whether the app supports nested modules (only meaningful for apps).
    #[serde(rename = "with_modules", default)]
    pub has_modules: bool,
    /// Whether a static-site directory is part of the standard layout.
    #[serde(rename = "with_hugo", default)]
    pub has_site: bool,
    /// Ordered, duplicate-free list of relative directories.
    #[serde(default)]
    pub directories: Vec<String>,
    /// Remote repository name or URL; empty means not configured.
    #[serde(rename = "github_repo", default)]
    pub repo_identifier: String,
    /// Module/import path; empty means not configured.
    #[serde(rename = "go_module", default)]
    pub module_path: String,
}

impl Blueprint {
    /// Appends `entry` unless an equivalent entry is already present.
    ///
    /// Entries are compared with any trailing `/` removed, so `modules/billing`
    /// and `modules/billing/` are the same directory. Returns whether the
    /// entry was added.
    pub fn add_directory(&mut self, entry: &str) -> bool {
        if entry.trim().is_empty() || self.contains_directory(entry) {
            return false;
        }
        self.directories.push(entry.to_string());
        true
    }

    pub fn contains_directory(&self, entry: &str) -> bool {
        let wanted = normalize_entry(entry);
        self.directories
            .iter()
            .any(|existing| normalize_entry(existing) == wanted)
    }

    /// True when a repository identifier has been recorded.
    pub fn is_repo_configured(&self) -> bool {
        !self.repo_identifier.trim().is_empty()
    }

    /// Name of the application entrypoint directory under the commands root.
    ///
    /// The last segment of the module path wins when it is a plain directory
    /// name; otherwise `fallback` (the project directory name) is used.
    pub fn entrypoint_name(&self, fallback: &str) -> String {
        let segment = self
            .module_path
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .find(|segment| !segment.is_empty());
        match segment {
            Some(segment) if is_plain_name(segment) => segment.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Pretty JSON rendering used for previews and persistence.
    pub fn to_pretty_json(&self) -> Result<String, ProgramidexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// True when `entry` stays inside the project root once joined onto it:
/// non-empty, relative, and without `..` components.
pub fn is_contained_entry(entry: &str) -> bool {
    let trimmed = entry.trim();
    !trimmed.is_empty()
        && Path::new(trimmed)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_plain_name(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !segment.contains('\\')
}

fn normalize_entry(entry: &str) -> &str {
    let trimmed = entry.trim();
    let stripped = trimmed.trim_end_matches('/');
    if stripped.is_empty() {
        trimmed
    } else {
        stripped
    }
}

/// Serde adapter mapping `Option<ProjectKind>` to the `"type"` string field.
mod kind_field {
    use super::*;

    pub fn serialize<S>(kind: &Option<ProjectKind>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(kind.map(|k| k.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ProjectKind>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| value.parse().ok()))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_kind_parsing() {
        assert_eq!("app".parse::<ProjectKind>().unwrap(), ProjectKind::App);
        assert_eq!(" Module \n".parse::<ProjectKind>().unwrap(), ProjectKind::Module);
        let err = "library".parse::<ProjectKind>().unwrap_err();
        assert!(matches!(err, ProgramidexError::InvalidProjectKind(ref k) if k == "library"));
        assert!("".parse::<ProjectKind>().is_err());
    }

    #[test]
    fn test_add_directory_is_idempotent() {
        let mut bp = Blueprint::default();
        assert!(bp.add_directory("cmd/"));
        assert!(!bp.add_directory("cmd/"));
        assert!(!bp.add_directory("cmd"));
        assert!(bp.add_directory("modules/billing"));
        assert!(!bp.add_directory("modules/billing/"));
        assert!(!bp.add_directory("   "));
        assert_eq!(bp.directories, vec!["cmd/", "modules/billing"]);
    }

    #[test]
    fn test_entrypoint_name() {
        let mut bp = Blueprint::default();
        assert_eq!(bp.entrypoint_name("project"), "project");
        bp.module_path = "github.com/acme/widgets".to_string();
        assert_eq!(bp.entrypoint_name("project"), "widgets");
        bp.module_path = "github.com/acme/tools/".to_string();
        assert_eq!(bp.entrypoint_name("project"), "tools");
        bp.module_path = "github.com/acme/..".to_string();
        assert_eq!(bp.entrypoint_name("project"), "project");
        bp.module_path = "example.com/./".to_string();
        assert_eq!(bp.entrypoint_name("project"), "project");
    }

    #[test]
    fn test_is_contained_entry() {
        assert!(is_contained_entry("cmd/"));
        assert!(is_contained_entry("modules/billing/"));
        assert!(is_contained_entry("./docs"));
        assert!(!is_contained_entry(""));
        assert!(!is_contained_entry("../outside/"));
        assert!(!is_contained_entry("modules/../../outside"));
        assert!(!is_contained_entry("/abs/"));
    }

    #[test]
    fn test_serializes_with_fixed_field_names_and_order() {
        let bp = Blueprint {
            kind: Some(ProjectKind::App),
            has_modules: true,
            has_site: true,
            directories: vec!["cmd/".into(), ".dex/".into()],
            repo_identifier: "acme/widgets".into(),
            module_path: "github.com/acme/widgets".into(),
        };
        let json = serde_json::to_string(&bp).unwrap();
        assert_eq!(
            json,
            r#"{"type":"app","with_modules":true,"with_hugo":true,"directories":["cmd/",".dex/"],"github_repo":"acme/widgets","go_module":"github.com/acme/widgets"}"#
        );
    }

    #[test]
    fn test_zero_value_and_lenient_kind() {
        let json = serde_json::to_string(&Blueprint::default()).unwrap();
        assert!(json.contains(r#""type":"""#));

        let parsed: Blueprint = serde_json::from_str(r#"{"type":"plugin"}"#).unwrap();
        assert_eq!(parsed.kind, None);
        assert!(parsed.directories.is_empty());

        let partial: Blueprint =
            serde_json::from_str(r#"{"type":"module","directories":["widgets/"]}"#).unwrap();
        assert_eq!(partial.kind, Some(ProjectKind::Module));
        assert_eq!(partial.repo_identifier, "");
    }
}
