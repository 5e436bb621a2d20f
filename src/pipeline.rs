// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one generation run: resolve, discover, de-interpolate, extract, stamp, compose, write
// role: processing/orchestrator
// inputs: Settings, InputFoldersProvider, SpecificationExtractor<S>, Composer<S>, command line arguments
// outputs: Outcome (help printed or run summary); generated files on disk
// side_effects: Prints help/progress to stdout and extraction errors to stderr; rewrites sources transiently; stamps ephemeral files; writes artifacts
// invariants:
// - stages run in fixed order; the first fatal error ends the run
// - help short-circuits before any folder is looked up
// - interpolation snapshots are restored before the extraction result is inspected, and on every early exit
// - extraction errors never abort the run
// errors: PipelineError from each stage; collaborator errors wrapped as Folders/Extraction/Composer
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::cli;
use crate::collaborators::{Composer, InputFoldersProvider, SpecificationExtractor};
use crate::discovery::{self, DiscoveryOptions};
use crate::ephemeral::{self, Marker};
use crate::error::{PipelineError, Result};
use crate::interpolation::InterpolationGuard;
use crate::model::{Extraction, FileRef};
use crate::params::{ParameterSet, Settings};
use crate::util::Progress;
use crate::writer::{self, WriteReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Start,
  ParametersResolved,
  FilesDiscovered,
  InterpolationHandled,
  Extracted,
  MarkersStamped,
  Composed,
  Written,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Stage::Start => "start",
      Stage::ParametersResolved => "parameters-resolved",
      Stage::FilesDiscovered => "files-discovered",
      Stage::InterpolationHandled => "interpolation-handled",
      Stage::Extracted => "extracted",
      Stage::MarkersStamped => "markers-stamped",
      Stage::Composed => "composed",
      Stage::Written => "written",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
  pub files: Vec<FileRef>,
  pub extraction_errors: usize,
  pub stamped: usize,
  pub report: WriteReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  HelpPrinted,
  Done(RunSummary),
}

/// A generation tool: deployment settings plus the three plugged-in collaborators.
pub struct Pipeline<S> {
  settings: Settings,
  folders: Box<dyn InputFoldersProvider>,
  extractor: Box<dyn SpecificationExtractor<S>>,
  composer: Box<dyn Composer<S>>,
}

impl<S> Pipeline<S> {
  pub fn new(
    settings: Settings,
    folders: impl InputFoldersProvider + 'static,
    extractor: impl SpecificationExtractor<S> + 'static,
    composer: impl Composer<S> + 'static,
  ) -> Self {
    Self {
      settings,
      folders: Box::new(folders),
      extractor: Box::new(extractor),
      composer: Box::new(composer),
    }
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn help(&self) -> String {
    cli::help_text(&self.settings)
  }

  /// Resolve `args` (program name excluded) and run every stage.
  pub fn run<A: AsRef<str>>(&self, args: &[A]) -> Result<Outcome> {
    let mut stage = Stage::Start;
    let result = cli::resolve(args, &self.settings).and_then(|params| {
      advance(&mut stage, Stage::ParametersResolved);
      self.stages(&params, &mut stage)
    });
    finish(stage, result)
  }

  /// Run every stage with already-resolved parameters.
  pub fn run_with(&self, params: &ParameterSet) -> Result<Outcome> {
    let mut stage = Stage::ParametersResolved;
    let result = self.stages(params, &mut stage);
    finish(stage, result)
  }

  fn stages(&self, params: &ParameterSet, stage: &mut Stage) -> Result<Outcome> {
    let progress = Progress::new(params.verbose);

    if params.print_help {
      println!("{}", self.help());
      return Ok(Outcome::HelpPrinted);
    }

    progress.say(format!("Working directory: {}", params.working_directory.display()));
    if params.verbose {
      if let Ok(json) = serde_json::to_string_pretty(params) {
        progress.say(format!("Execution parameters:\n{}", json));
      }
    }

    progress.say("Obtaining input folders...");
    let input_folders = self.folders.input_folders(params).map_err(PipelineError::Folders)?;
    progress.list("Input folders list", &display_all(&input_folders));

    progress.say("Finding files in input folders...");
    let opts = DiscoveryOptions::from_params(params, &self.settings);
    let files = discovery::discover(&input_folders, &params.working_directory, &opts)?;
    progress.list("Files list", &files);
    advance(stage, Stage::FilesDiscovered);

    let extraction = self.extract(&files, params, &progress, stage)?;
    advance(stage, Stage::Extracted);

    if !extraction.errors.is_empty() {
      eprintln!("Specifications errors");
      for err in &extraction.errors {
        warn!(file = %err.file, description = %err.description, "extraction error");
        eprintln!("{}", err);
      }
    }

    let stamped = if params.ephemeral { self.stamp_ephemeral(params, &progress)? } else { 0 };
    advance(stage, Stage::MarkersStamped);

    progress.say("Composing implementations...");
    let extraction_errors = extraction.errors.len();
    let artifacts = self.composer.compose(extraction.specification, params).map_err(PipelineError::Composer)?;
    progress.say("Implementations successfully composed");
    advance(stage, Stage::Composed);

    progress.say("Writing implementations to their destinations...");
    let report = writer::write(&artifacts, &params.working_directory, &progress)?;
    advance(stage, Stage::Written);
    info!(
      written = report.written.len(),
      unchanged = report.unchanged.len(),
      skipped = report.skipped.len(),
      "artifacts processed"
    );
    progress.say("Done!");

    Ok(Outcome::Done(RunSummary { files, extraction_errors, stamped, report }))
  }

  /// Run the extractor inside the interpolation bracket.
  fn extract(
    &self,
    files: &[FileRef],
    params: &ParameterSet,
    progress: &Progress,
    stage: &mut Stage,
  ) -> Result<Extraction<S>> {
    let guard = if params.resolving_interpolation {
      InterpolationGuard::acquire(files, progress)?
    } else {
      InterpolationGuard::inactive()
    };
    advance(stage, Stage::InterpolationHandled);

    progress.say("Running extractor through files list...");
    let extracted = self.extractor.extract(files);

    if let Err(restore_err) = guard.restore() {
      if let Err(extract_err) = &extracted {
        error!(error = %format!("{:#}", extract_err), "extraction failed before restore failure");
      }
      return Err(restore_err);
    }
    extracted.map_err(PipelineError::Extraction)
  }

  fn stamp_ephemeral(&self, params: &ParameterSet, progress: &Progress) -> Result<usize> {
    progress.say("Processing ephemeral files...");
    let folders = self.folders.ephemeral_folders(params).map_err(PipelineError::Folders)?;
    let files = discovery::discover(&folders, &params.working_directory, &DiscoveryOptions::flat())?;
    let marker = Marker::new(&self.settings.ephemeral_marker, &self.settings.comment_prefix);
    ephemeral::stamp(&files, &marker, progress)
  }
}

fn finish(stage: Stage, result: Result<Outcome>) -> Result<Outcome> {
  match &result {
    Ok(_) => debug!(%stage, "run finished"),
    Err(err) => error!(%stage, error = %err, "run failed"),
  }
  result
}

fn advance(stage: &mut Stage, next: Stage) {
  debug!(from = %stage, to = %next, "stage");
  *stage = next;
}

fn display_all(paths: &[PathBuf]) -> Vec<String> {
  paths.iter().map(|p| p.display().to_string()).collect()
}
