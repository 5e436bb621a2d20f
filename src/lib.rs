//! Code generation pipeline: resolve flags, discover sources, let an extractor
//! parse them, let a composer turn the result into artifacts, and write those
//! artifacts without touching files whose content did not change.
//!
//! A tool plugs in three collaborators and runs [`Pipeline::run`]; the binary
//! in this crate wires the [`inventory`] collaborators.

use std::panic::{catch_unwind, AssertUnwindSafe};

pub mod cli;
pub mod collaborators;
pub mod discovery;
pub mod ephemeral;
pub mod error;
pub mod interpolation;
pub mod inventory;
pub mod model;
pub mod params;
pub mod pipeline;
pub mod util;
pub mod writer;

pub use collaborators::{Composer, InputFoldersProvider, SpecificationExtractor, StaticFolders};
pub use error::{PipelineError, EXIT_FAILURE, EXIT_OK, EXIT_UNDESCRIBED};
pub use model::{Artifact, Extraction, ExtractionError, FileRef};
pub use params::{ParameterSet, Settings};
pub use pipeline::{Outcome, Pipeline, RunSummary};

/// Run the pipeline and map the result to a process exit code.
///
/// Fatal errors are printed to stderr and yield [`EXIT_FAILURE`]; a panic
/// escaping a collaborator yields [`EXIT_UNDESCRIBED`].
pub fn run_to_exit_code<S, A: AsRef<str>>(pipeline: &Pipeline<S>, args: &[A]) -> i32 {
  match catch_unwind(AssertUnwindSafe(|| pipeline.run(args))) {
    Ok(Ok(_)) => EXIT_OK,
    Ok(Err(err)) => {
      eprintln!("autograph error:\n{err}");
      err.exit_code()
    }
    Err(payload) => {
      let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "undescribed failure".to_string());
      eprintln!("autograph error:\n{message}");
      EXIT_UNDESCRIBED
    }
  }
}
