// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolved execution parameters and the deployment settings that shape their resolution
// role: model/config
// inputs: Values produced by cli::resolve; Settings built in code or loaded from JSON
// outputs: Immutable ParameterSet threaded through every stage; Settings consulted by resolver, discovery and marker
// side_effects: Settings::from_json_file reads a file
// invariants:
// - ParameterSet has no setters; equality is structural over every field
// - raw never contains recognized flags
// - working_directory is captured once by the resolver, never user-supplied
// errors: JSON/IO errors carry the settings file path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "ProjectName";
pub const DEFAULT_EPHEMERAL_MARKER: &str = "// synopsis:disable";
pub const DEFAULT_COMMENT_PREFIX: &str = "//";

/// All execution parameters a generation run can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSet {
  /// `-project_name <name>`; defaults to `Settings::default_project_name`.
  pub project_name: String,
  /// Descend into subfolders while discovering files.
  pub recursive_search: bool,
  /// `-verbose`: narrate every stage on stdout.
  pub verbose: bool,
  /// `-ephemeral`: stamp the disabling marker into ephemeral files so they
  /// are generated once and maintained by hand afterwards.
  pub ephemeral: bool,
  /// `-help`: print the help text and stop.
  pub print_help: bool,
  /// `-resolving_interpolation`: strip foreign letters from sources while the
  /// extractor runs, restoring them afterwards.
  pub resolving_interpolation: bool,
  /// Process working directory at resolution time.
  pub working_directory: PathBuf,
  /// Every other `-flag value` / bare `-flag` (stored with an empty value).
  pub raw: BTreeMap<String, String>,
}

impl ParameterSet {
  /// Look up a raw flag, e.g. `params.get("-output")`.
  pub fn get(&self, flag: &str) -> Option<&str> {
    self.raw.get(flag).map(String::as_str)
  }

  /// Resolve a possibly relative path against the captured working directory.
  pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
      self.working_directory.clone()
    } else if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.working_directory.join(path)
    }
  }
}

/// Deployment policy for a generation tool built on this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub default_project_name: String,
  /// true: recursive unless `-non_recursive`; false: flat unless `-recursive`.
  pub recursive_by_default: bool,
  /// Only files with this extension are discovered inside folders (no leading dot).
  pub source_extension: Option<String>,
  pub ephemeral_marker: String,
  pub comment_prefix: String,
  /// Tool-specific text appended to the generated help.
  pub help_addendum: Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      default_project_name: DEFAULT_PROJECT_NAME.to_string(),
      recursive_by_default: true,
      source_extension: None,
      ephemeral_marker: DEFAULT_EPHEMERAL_MARKER.to_string(),
      comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
      help_addendum: None,
    }
  }
}

impl Settings {
  pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let buf = std::fs::read(path).with_context(|| format!("reading settings {}", path.display()))?;
    serde_json::from_slice(&buf).with_context(|| format!("parsing settings {}", path.display()))
  }

  pub fn with_source_extension(mut self, ext: impl Into<String>) -> Self {
    self.source_extension = Some(ext.into().trim_start_matches('.').to_string());
    self
  }

  pub fn with_recursive_by_default(mut self, recursive: bool) -> Self {
    self.recursive_by_default = recursive;
    self
  }

  pub fn with_help_addendum(mut self, help: impl Into<String>) -> Self {
    self.help_addendum = Some(help.into());
    self
  }

  /// The flag that flips the recursion default.
  pub fn recursion_flag(&self) -> &'static str {
    if self.recursive_by_default {
      "-non_recursive"
    } else {
      "-recursive"
    }
  }
}
