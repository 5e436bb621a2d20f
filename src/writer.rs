// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Write composed artifacts to their destinations, touching only files whose content changed
// role: persistence/artifacts
// inputs: Vec<Artifact>, base directory for relative paths, Progress
// outputs: Files on disk; WriteReport (written, unchanged, skipped)
// side_effects: Creates missing directories; creates or overwrites changed files
// invariants:
// - phase 1 creates every destination directory before any file is written; existing directories are left alone
// - a destination already holding byte-identical content is not opened for writing (mtime untouched)
// - an unparseable destination is skipped and reported, never fatal
// errors: Directory creation or file write failures => PipelineError::Write with full path (fatal)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::model::Artifact;
use crate::util::Progress;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
  pub written: Vec<PathBuf>,
  pub unchanged: Vec<PathBuf>,
  pub skipped: Vec<String>,
}

/// Destination for an artifact path, or `None` when it cannot name a file.
pub fn destination(file_path: &str, base: &Path) -> Option<PathBuf> {
  if file_path.is_empty() || file_path.contains('\0') || file_path.ends_with('/') {
    return None;
  }
  let path = Path::new(file_path);
  path.file_name()?;
  Some(if path.is_absolute() { path.to_path_buf() } else { base.join(path) })
}

pub fn write(artifacts: &[Artifact], base: &Path, progress: &Progress) -> Result<WriteReport> {
  let mut report = WriteReport::default();
  let mut targets: Vec<(PathBuf, &Artifact)> = Vec::with_capacity(artifacts.len());

  for artifact in artifacts {
    match destination(&artifact.file_path, base) {
      Some(path) => targets.push((path, artifact)),
      None => {
        warn!(file_path = %artifact.file_path, "cannot derive a destination, skipping");
        progress.say(format!("Cannot create a destination from '{}'", artifact.file_path));
        report.skipped.push(artifact.file_path.clone());
      }
    }
  }

  for (path, _) in &targets {
    create_folder_if_needed(path, progress)?;
  }

  for (path, artifact) in targets {
    progress.say(format!("Processing file: {}", path.display()));
    if is_unchanged(&path, &artifact.source_code) {
      progress.say(format!("File {} didn't change, skipping...", path.display()));
      report.unchanged.push(path);
      continue;
    }
    std::fs::write(&path, &artifact.source_code).map_err(|source| PipelineError::Write { path: path.clone(), source })?;
    report.written.push(path);
  }

  Ok(report)
}

fn create_folder_if_needed(path: &Path, progress: &Progress) -> Result<()> {
  let Some(folder) = path.parent() else {
    return Ok(());
  };
  if folder.is_dir() {
    progress.say(format!("Folder {} already exist", folder.display()));
    return Ok(());
  }
  std::fs::create_dir_all(folder).map_err(|source| PipelineError::Write { path: folder.to_path_buf(), source })
}

fn is_unchanged(path: &Path, source_code: &str) -> bool {
  match std::fs::read(path) {
    Ok(existing) => existing == source_code.as_bytes(),
    Err(_) => false,
  }
}
