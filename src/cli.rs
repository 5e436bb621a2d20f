use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::params::{ParameterSet, Settings};

const VERBOSE: &str = "-verbose";
const HELP: &str = "-help";
const EPHEMERAL: &str = "-ephemeral";
const RESOLVING_INTERPOLATION: &str = "-resolving_interpolation";
const PROJECT_NAME: &str = "-project_name";

fn is_flag(token: &str) -> bool {
  token.starts_with('-')
}

/// Resolve command line arguments (without the program name) into parameters.
///
/// The working directory is captured here, once, from the process.
pub fn resolve<S: AsRef<str>>(args: &[S], settings: &Settings) -> Result<ParameterSet> {
  let cwd = std::env::current_dir().map_err(|e| PipelineError::io(".", e))?;
  resolve_in(args, settings, cwd)
}

pub(crate) fn resolve_in<S: AsRef<str>>(
  args: &[S],
  settings: &Settings,
  working_directory: PathBuf,
) -> Result<ParameterSet> {
  let recursion_flag = settings.recursion_flag();

  let mut verbose = false;
  let mut print_help = false;
  let mut ephemeral = false;
  let mut resolving_interpolation = false;
  let mut recursive_search = settings.recursive_by_default;
  let mut project_name = settings.default_project_name.clone();
  let mut raw: BTreeMap<String, String> = BTreeMap::new();

  let value_after = |i: usize| -> Option<&str> {
    args.get(i + 1).map(AsRef::as_ref).filter(|v| !is_flag(v))
  };

  let mut i = 0;
  while i < args.len() {
    let token = args[i].as_ref();
    if !is_flag(token) {
      debug!(token, "ignoring positional argument");
      i += 1;
      continue;
    }

    match token {
      VERBOSE => verbose = true,
      HELP => print_help = true,
      EPHEMERAL => ephemeral = true,
      RESOLVING_INTERPOLATION => resolving_interpolation = true,
      t if t == recursion_flag => recursive_search = !settings.recursive_by_default,
      PROJECT_NAME => match value_after(i) {
        Some(value) => {
          debug!(project_name = value, "project name");
          project_name = value.to_string();
          i += 1;
        }
        None => return Err(PipelineError::MalformedArgument { flag: PROJECT_NAME.into() }),
      },
      other => match value_after(i) {
        Some(value) => {
          debug!(flag = other, value, "found pair of arguments");
          raw.insert(other.to_string(), value.to_string());
          i += 1;
        }
        None => {
          debug!(flag = other, "found argument");
          raw.insert(other.to_string(), String::new());
        }
      },
    }
    i += 1;
  }

  Ok(ParameterSet {
    project_name,
    recursive_search,
    verbose,
    ephemeral,
    print_help,
    resolving_interpolation,
    working_directory,
    raw,
  })
}

/// Help text for the recognized flags, followed by the tool's own addendum.
pub fn help_text(settings: &Settings) -> String {
  let recursion = if settings.recursive_by_default {
    "-non_recursive\n\
     Only the input folder itself is searched; subfolders are skipped.\n"
  } else {
    "-recursive\n\
     Application will go through all nested folders in the input folder path.\n"
  };

  let mut help = format!(
    "Accepted arguments:\n\
     \n\
     -project_name [name]\n\
     Project name to be used in generated files.\n\
     If not set, \"{name}\" is used as a default project name.\n\
     \n\
     -verbose\n\
     Application prints additional verbose information: found input files and folders, successfully saved files etc.\n\
     \n\
     {recursion}\
     \n\
     -ephemeral\n\
     Adds the disabling comment '{marker}' to ephemeral files.\n\
     After the first generation those files are not regenerated until the comment is removed;\n\
     use it to generate code once and maintain it manually afterwards.\n\
     \n\
     -resolving_interpolation\n\
     Temporarily strips non-ASCII letters the source parser cannot tokenize inside interpolations.\n\
     Files are restored to their original content once parsing is done.\n",
    name = settings.default_project_name,
    marker = settings.ephemeral_marker,
  );

  if let Some(extra) = &settings.help_addendum {
    help.push('\n');
    help.push_str(extra);
    if !extra.ends_with('\n') {
      help.push('\n');
    }
  }
  help
}
