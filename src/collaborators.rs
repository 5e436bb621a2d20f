// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Narrow contracts for the pieces a generation tool plugs in: input folders, extractor, composer
// role: contracts/collaborators
// inputs: ParameterSet, discovered FileRefs, the extractor's specification
// outputs: Folder lists, Extraction<S>, Vec<Artifact>
// invariants: Plain closures satisfy every contract; collaborators never see ambient process state
// errors: Collaborators report failures as anyhow errors; the pipeline wraps them into PipelineError
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use anyhow::Result;

use crate::model::{Artifact, Extraction, FileRef};
use crate::params::ParameterSet;

/// Supplies the folders to scan for sources and the folders holding ephemeral files.
pub trait InputFoldersProvider {
  fn input_folders(&self, params: &ParameterSet) -> Result<Vec<PathBuf>>;

  /// Folders whose files receive the ephemeral marker. None by default.
  fn ephemeral_folders(&self, _params: &ParameterSet) -> Result<Vec<PathBuf>> {
    Ok(Vec::new())
  }
}

/// Parses source files into a specification of type `S`.
pub trait SpecificationExtractor<S> {
  fn extract(&self, files: &[FileRef]) -> Result<Extraction<S>>;
}

/// Turns a specification into generated artifacts.
pub trait Composer<S> {
  fn compose(&self, specification: S, params: &ParameterSet) -> Result<Vec<Artifact>>;
}

impl<S, F> SpecificationExtractor<S> for F
where
  F: Fn(&[FileRef]) -> Result<Extraction<S>>,
{
  fn extract(&self, files: &[FileRef]) -> Result<Extraction<S>> {
    self(files)
  }
}

impl<S, F> Composer<S> for F
where
  F: Fn(S, &ParameterSet) -> Result<Vec<Artifact>>,
{
  fn compose(&self, specification: S, params: &ParameterSet) -> Result<Vec<Artifact>> {
    self(specification, params)
  }
}

/// Fixed folder lists, handy for tools whose inputs never change.
#[derive(Debug, Clone, Default)]
pub struct StaticFolders {
  pub input: Vec<PathBuf>,
  pub ephemeral: Vec<PathBuf>,
}

impl InputFoldersProvider for StaticFolders {
  fn input_folders(&self, _params: &ParameterSet) -> Result<Vec<PathBuf>> {
    Ok(self.input.clone())
  }

  fn ephemeral_folders(&self, _params: &ParameterSet) -> Result<Vec<PathBuf>> {
    Ok(self.ephemeral.clone())
  }
}
