// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Expand input folders into a flat list of candidate source files
// role: discovery/filesystem
// inputs: Folder paths (absolute, relative to the working directory, or empty for the working directory), DiscoveryOptions
// outputs: Vec<FileRef> with absolute paths
// side_effects: Reads directory listings
// invariants:
// - folders are processed in the order given; results are concatenated without de-duplication
// - entries inside one folder are sorted by file name at every level
// - a path naming a regular file is returned as-is, bypassing recursion and extension filtering
// - non-recursive mode yields immediate children only
// errors: Missing or unreadable folder => FolderNotFound (fatal); failures deeper in the walk => Walk
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{PipelineError, Result};
use crate::model::FileRef;
use crate::params::{ParameterSet, Settings};
use crate::util::canonicalize_lossy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
  pub recursive: bool,
  /// Extension without the leading dot; `None` keeps every regular file.
  pub extension: Option<String>,
}

impl DiscoveryOptions {
  pub fn from_params(params: &ParameterSet, settings: &Settings) -> Self {
    Self { recursive: params.recursive_search, extension: settings.source_extension.clone() }
  }

  /// Options for ephemeral folders: immediate children, no extension filter.
  pub fn flat() -> Self {
    Self { recursive: false, extension: None }
  }

  fn accepts(&self, path: &Path) -> bool {
    match &self.extension {
      None => true,
      Some(ext) => path.extension().map(|e| e == ext.as_str()).unwrap_or(false),
    }
  }
}

/// Find all candidate files in `folders`, resolving relative entries against `base`.
pub fn discover(folders: &[PathBuf], base: &Path, opts: &DiscoveryOptions) -> Result<Vec<FileRef>> {
  let mut files = Vec::new();
  for folder in folders {
    files.extend(discover_folder(folder, base, opts)?);
  }
  Ok(files)
}

pub fn discover_folder(folder: &Path, base: &Path, opts: &DiscoveryOptions) -> Result<Vec<FileRef>> {
  let path = if folder.as_os_str().is_empty() {
    base.to_path_buf()
  } else if folder.is_absolute() {
    folder.to_path_buf()
  } else {
    base.join(folder)
  };

  let meta = std::fs::metadata(&path).map_err(|_| PipelineError::FolderNotFound { path: path.clone() })?;
  let root = canonicalize_lossy(&path);

  if meta.is_file() {
    debug!(file = %root.display(), "input path is a file");
    return Ok(vec![FileRef::new(root)]);
  }
  if !meta.is_dir() {
    return Err(PipelineError::FolderNotFound { path });
  }

  let mut walker = WalkDir::new(&root).min_depth(1).sort_by_file_name();
  if !opts.recursive {
    walker = walker.max_depth(1);
  }

  let mut files = Vec::new();
  for entry in walker {
    let entry = entry.map_err(|source| {
      if source.depth() == 0 {
        PipelineError::FolderNotFound { path: root.clone() }
      } else {
        PipelineError::Walk { folder: root.clone(), source }
      }
    })?;

    let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
    if !is_file || !opts.accepts(entry.path()) {
      continue;
    }
    files.push(FileRef::new(entry.into_path()));
  }

  debug!(folder = %root.display(), count = files.len(), recursive = opts.recursive, "discovered files");
  Ok(files)
}
