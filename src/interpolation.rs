// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Strip foreign (Cyrillic) letters from sources while the extractor runs, then put the originals back
// role: transform/scoped-mutation
// inputs: Discovered FileRefs
// outputs: InterpolationGuard holding one snapshot per rewritten file
// side_effects: Overwrites matching files on disk; restores them on restore() or Drop
// invariants:
// - a snapshot is recorded before its file is overwritten
// - files without a match are neither touched nor recorded; non-UTF-8 files count as no match
// - every snapshot is written back verbatim on every exit path (explicit restore, error return, panic unwind)
// - restore drains the guard; Drop only acts on snapshots still pending
// errors: Read/write failures during acquisition surface as PipelineError::Io after already-mutated files are restored; restore failures => PipelineError::Restore
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info};

use crate::error::{PipelineError, Result};
use crate::model::FileRef;
use crate::util::{write_text, Progress};

static FOREIGN_LETTERS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)[а-яА-Я]+").expect("foreign letters pattern"));

/// Text with every foreign-letter run removed, or `None` when nothing matches.
pub fn strip_foreign_letters(content: &str) -> Option<String> {
  if FOREIGN_LETTERS.is_match(content) {
    Some(FOREIGN_LETTERS.replace_all(content, "").into_owned())
  } else {
    None
  }
}

/// Original contents of files rewritten for the extractor.
///
/// Dropping the guard writes every pending snapshot back. Call
/// [`InterpolationGuard::restore`] to do it explicitly and observe failures.
#[derive(Debug, Default)]
pub struct InterpolationGuard {
  snapshots: BTreeMap<PathBuf, String>,
}

impl InterpolationGuard {
  /// A guard with nothing to restore, used when the pass is disabled.
  pub fn inactive() -> Self {
    Self::default()
  }

  /// Rewrite every matching file, snapshotting its original content first.
  pub fn acquire(files: &[FileRef], progress: &Progress) -> Result<Self> {
    let mut guard = Self::default();
    for file in files {
      progress.say(format!("Resolving interpolation for file at: {}", file));
      let bytes = std::fs::read(file.path()).map_err(|e| PipelineError::io(file.path(), e))?;
      let Ok(content) = String::from_utf8(bytes) else {
        debug!(file = %file, "not UTF-8, left for the extractor to report");
        continue;
      };
      let Some(resolved) = strip_foreign_letters(&content) else {
        continue;
      };
      guard.snapshots.insert(file.path().to_path_buf(), content);
      // On failure the guard drops here and restores what it already rewrote.
      write_text(file.path(), &resolved)?;
    }
    if !guard.is_empty() {
      info!(files = guard.len(), "stripped foreign letters before extraction");
    }
    Ok(guard)
  }

  pub fn len(&self) -> usize {
    self.snapshots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.snapshots.is_empty()
  }

  pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
    self.snapshots.keys()
  }

  /// Write every snapshot back, attempting all of them even if some fail.
  pub fn restore(mut self) -> Result<()> {
    let failed = self.drain();
    if failed.is_empty() {
      Ok(())
    } else {
      Err(PipelineError::Restore { paths: failed })
    }
  }

  fn drain(&mut self) -> Vec<PathBuf> {
    let mut failed = Vec::new();
    for (path, original) in std::mem::take(&mut self.snapshots) {
      if let Err(e) = write_text(&path, &original) {
        error!(path = %path.display(), error = %e, "failed to restore original content");
        failed.push(path);
      }
    }
    failed
  }
}

impl Drop for InterpolationGuard {
  fn drop(&mut self) {
    if self.snapshots.is_empty() {
      return;
    }
    let failed = self.drain();
    if !failed.is_empty() {
      error!(files = failed.len(), "interpolation snapshots could not all be restored");
    }
  }
}
