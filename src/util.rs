// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, whole-file IO with path context, and verbose progress narration
// role: utilities/helpers
// inputs: Paths; text; verbose flag
// outputs: Canonicalized paths, file contents, stdout narration
// side_effects: read_text/write_text touch the filesystem; Progress::say prints to stdout when verbose
// invariants:
// - IO errors always carry the offending path
// - Progress output goes to stdout only when verbose; tracing always receives it at debug level
// errors: PipelineError::Io with full path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PipelineError, Result};

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> PathBuf {
  let p = p.as_ref();
  std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

pub fn read_text(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
  std::fs::write(path, content).map_err(|e| PipelineError::io(path, e))
}

/// Verbose narration of pipeline progress.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
  verbose: bool,
}

impl Progress {
  pub fn new(verbose: bool) -> Self {
    Self { verbose }
  }

  pub fn say(&self, msg: impl Display) {
    debug!("{}", msg);
    if self.verbose {
      println!("{}", msg);
    }
  }

  pub fn list<T: Display>(&self, title: &str, items: &[T]) {
    if !self.verbose {
      return;
    }
    let lines: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    self.say(format!("{}:\n{}", title, lines.join("\n")));
  }
}
