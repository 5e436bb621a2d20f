// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Ready-made collaborators that inventory source folders into a JSON manifest; wiring for the autograph binary
// role: collaborators/reference
// inputs: -input, -ephemeral_input, -output raw flags; discovered FileRefs
// outputs: Inventory specification; one Artifact at <output>/<project_name>.inventory.json
// side_effects: Reads every discovered file
// invariants:
// - entries follow discovery order
// - files under the output folder are left out, so reruns compose the same manifest
// - entry paths are relative to the working directory when they live under it
// - unreadable or non-UTF-8 files become extraction errors, never fatal
// errors: Manifest serialization failures surface through anyhow
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::collaborators::{Composer, InputFoldersProvider, SpecificationExtractor};
use crate::ephemeral::Marker;
use crate::model::{Artifact, Extraction, ExtractionError, FileRef};
use crate::params::{ParameterSet, Settings};
use crate::pipeline::Pipeline;
use crate::util::canonicalize_lossy;

pub const INPUT: &str = "-input";
pub const EPHEMERAL_INPUT: &str = "-ephemeral_input";
pub const OUTPUT: &str = "-output";
pub const DEFAULT_OUTPUT: &str = "generated";

pub const HELP: &str = "-input [folders]\n\
  Comma-separated folders (or files) to inventory. Defaults to the working directory.\n\
  \n\
  -ephemeral_input [folders]\n\
  Comma-separated folders whose files receive the disabling comment with -ephemeral.\n\
  \n\
  -output [folder]\n\
  Folder for the <project_name>.inventory.json manifest. Defaults to \"generated\".\n";

fn split_list(value: &str) -> Vec<PathBuf> {
  value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(PathBuf::from).collect()
}

/// Folders taken from `-input a,b` and `-ephemeral_input c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldersFromFlags;

impl InputFoldersProvider for FoldersFromFlags {
  fn input_folders(&self, params: &ParameterSet) -> Result<Vec<PathBuf>> {
    match params.get(INPUT) {
      Some(value) if !value.is_empty() => Ok(split_list(value)),
      Some(_) => anyhow::bail!("{INPUT} parameter found, but value is absent"),
      None => Ok(vec![PathBuf::new()]),
    }
  }

  fn ephemeral_folders(&self, params: &ParameterSet) -> Result<Vec<PathBuf>> {
    Ok(params.get(EPHEMERAL_INPUT).map(split_list).unwrap_or_default())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
  pub path: PathBuf,
  pub lines: usize,
  pub bytes: u64,
  /// File carries the ephemeral marker.
  pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
  pub entries: Vec<InventoryEntry>,
}

impl Inventory {
  pub fn total_lines(&self) -> usize {
    self.entries.iter().map(|e| e.lines).sum()
  }

  pub fn total_bytes(&self) -> u64 {
    self.entries.iter().map(|e| e.bytes).sum()
  }
}

#[derive(Debug, Clone)]
pub struct InventoryExtractor {
  marker: String,
  comment_prefix: String,
}

impl InventoryExtractor {
  pub fn new(settings: &Settings) -> Self {
    Self { marker: settings.ephemeral_marker.clone(), comment_prefix: settings.comment_prefix.clone() }
  }

  fn entry(&self, file: &FileRef) -> std::result::Result<InventoryEntry, String> {
    let bytes = std::fs::read(file.path()).map_err(|e| format!("cannot read file: {e}"))?;
    let text = std::str::from_utf8(&bytes).map_err(|e| format!("not valid UTF-8: {e}"))?;
    Ok(InventoryEntry {
      path: file.path().to_path_buf(),
      lines: text.lines().count(),
      bytes: bytes.len() as u64,
      disabled: Marker::new(&self.marker, &self.comment_prefix).is_present(text),
    })
  }
}

impl SpecificationExtractor<Inventory> for InventoryExtractor {
  fn extract(&self, files: &[FileRef]) -> Result<Extraction<Inventory>> {
    let mut out = Extraction::clean(Inventory::default());
    for file in files {
      match self.entry(file) {
        Ok(entry) => out.specification.entries.push(entry),
        Err(description) => out.errors.push(ExtractionError { file: file.clone(), description }),
      }
    }
    Ok(out)
  }
}

#[derive(Serialize)]
struct Manifest<'a> {
  project: &'a str,
  files: usize,
  total_lines: usize,
  total_bytes: u64,
  entries: Vec<InventoryEntry>,
}

/// Writes the inventory as `<-output>/<project_name>.inventory.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestComposer;

impl ManifestComposer {
  pub fn manifest_path(params: &ParameterSet) -> PathBuf {
    let folder = params.get(OUTPUT).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_OUTPUT);
    params.resolve_path(folder).join(format!("{}.inventory.json", params.project_name))
  }
}

impl Composer<Inventory> for ManifestComposer {
  fn compose(&self, inventory: Inventory, params: &ParameterSet) -> Result<Vec<Artifact>> {
    let root = canonicalize_lossy(&params.working_directory);
    let path = Self::manifest_path(params);
    let output = path.parent().map(canonicalize_lossy).unwrap_or_else(|| root.clone());
    let inventory =
      Inventory { entries: inventory.entries.into_iter().filter(|e| !e.path.starts_with(&output)).collect() };
    let total_lines = inventory.total_lines();
    let total_bytes = inventory.total_bytes();
    let entries: Vec<InventoryEntry> = inventory
      .entries
      .into_iter()
      .map(|mut e| {
        if let Ok(rel) = e.path.strip_prefix(&root) {
          e.path = rel.to_path_buf();
        }
        e
      })
      .collect();

    let manifest =
      Manifest { project: &params.project_name, files: entries.len(), total_lines, total_bytes, entries };
    let mut json = serde_json::to_string_pretty(&manifest).context("serializing inventory manifest")?;
    json.push('\n');

    Ok(vec![Artifact::new(path.to_string_lossy(), json)])
  }
}

/// Settings used by the autograph binary: defaults plus the inventory help.
pub fn settings() -> Settings {
  Settings::default().with_help_addendum(HELP)
}

/// Pipeline wired with the inventory collaborators.
pub fn pipeline(settings: Settings) -> Pipeline<Inventory> {
  let extractor = InventoryExtractor::new(&settings);
  Pipeline::new(settings, FoldersFromFlags, extractor, ManifestComposer)
}
