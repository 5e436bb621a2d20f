// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the values flowing between stages: discovered files, extraction results, generated artifacts
// role: model/types
// outputs: FileRef, Extraction<S>, ExtractionError, Artifact
// invariants:
// - FileRef paths are absolute
// - Artifact equality compares file_path and source_code exactly
// - the specification inside Extraction is opaque to the pipeline
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A discovered candidate source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(PathBuf);

impl FileRef {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    FileRef(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }

  pub fn name(&self) -> String {
    self.0.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
  }
}

impl AsRef<Path> for FileRef {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for FileRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

/// A non-fatal problem the extractor hit in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
  pub file: FileRef,
  pub description: String,
}

impl fmt::Display for ExtractionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.file, self.description)
  }
}

/// What an extractor hands back: the specification plus per-file errors.
#[derive(Debug, Clone)]
pub struct Extraction<S> {
  pub specification: S,
  pub errors: Vec<ExtractionError>,
}

impl<S> Extraction<S> {
  pub fn clean(specification: S) -> Self {
    Self { specification, errors: Vec::new() }
  }
}

/// A unit of generated output: destination path and literal content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  pub file_path: String,
  pub source_code: String,
}

impl Artifact {
  pub fn new(file_path: impl Into<String>, source_code: impl Into<String>) -> Self {
    Self { file_path: file_path.into(), source_code: source_code.into() }
  }
}
