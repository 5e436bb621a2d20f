// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Error taxonomy for the pipeline (argument, discovery, extraction, compose, write, restore failures)
// role: errors/taxonomy
// outputs: PipelineError with human-readable Display and a process exit code
// invariants:
// - every variant is a described failure and maps to exit code 1
// - collaborator failures keep their anyhow chain as the error source
// errors: n/a
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a successful run or a printed help text.
pub const EXIT_OK: i32 = 0;
/// Exit code for a failure the pipeline can describe.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a failure that escaped as a panic from a collaborator.
pub const EXIT_UNDESCRIBED: i32 = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("{flag} parameter found, but value is absent")]
  MalformedArgument { flag: String },

  #[error("folder not found: {}", .path.display())]
  FolderNotFound { path: PathBuf },

  #[error("failed to walk folder {}: {source}", .folder.display())]
  Walk {
    folder: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to obtain input folders: {0:#}")]
  Folders(anyhow::Error),

  #[error("specification extraction failed: {0:#}")]
  Extraction(anyhow::Error),

  #[error("implementation composer failed: {0:#}")]
  Composer(anyhow::Error),

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to restore original content of {} file(s): {}", .paths.len(), join_paths(.paths))]
  Restore { paths: Vec<PathBuf> },

  #[error("{}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl PipelineError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    PipelineError::Io { path: path.into(), source }
  }

  /// Process exit code for this failure.
  pub fn exit_code(&self) -> i32 {
    EXIT_FAILURE
  }
}

fn join_paths(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, PipelineError>;
