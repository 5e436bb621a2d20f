use std::path::PathBuf;

use autograph::{Artifact, Extraction, FileRef, Outcome, ParameterSet, Pipeline, Settings, StaticFolders};
use serial_test::serial;

const MARKER: &str = "// synopsis:disable";

fn pipeline(settings: Settings) -> Pipeline<()> {
  let folders = StaticFolders { input: vec![PathBuf::from("Sources")], ephemeral: vec![PathBuf::from("Templates")] };
  let extractor = |_: &[FileRef]| -> anyhow::Result<Extraction<()>> { Ok(Extraction::clean(())) };
  let composer = |_: (), _: &ParameterSet| -> anyhow::Result<Vec<Artifact>> { Ok(Vec::new()) };
  Pipeline::new(settings, folders, extractor, composer)
}

fn stamped(outcome: Outcome) -> usize {
  match outcome {
    Outcome::Done(s) => s.stamped,
    Outcome::HelpPrinted => panic!("unexpected help"),
  }
}

#[test]
#[serial]
fn marker_is_inserted_after_header_exactly_once() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let _cwd = test_support::CwdGuard::push(td.path());
  let p = pipeline(Settings::default());

  assert_eq!(stamped(p.run(&["-ephemeral"]).unwrap()), 1);
  assert_eq!(stamped(p.run(&["-ephemeral"]).unwrap()), 0);

  let mock = std::fs::read_to_string(td.path().join("Templates/Mock.swift")).unwrap();
  assert_eq!(mock, format!("// Generated once\n// Edit freely\n{MARKER}\nfinal class Mock {{}}\n"));
}

#[test]
#[serial]
fn ephemeral_folders_are_left_alone_without_the_flag() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let before = test_support::read_tree(&td.path().join("Templates"));
  let _cwd = test_support::CwdGuard::push(td.path());

  assert_eq!(stamped(pipeline(Settings::default()).run(&[] as &[&str]).unwrap()), 0);
  assert_eq!(test_support::read_tree(&td.path().join("Templates")), before);
}

#[test]
#[serial]
fn custom_marker_and_prefix_from_settings_file() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  test_support::write_tree(
    td.path(),
    &[
      ("settings.json", r##"{"ephemeral_marker": "# keep:manual", "comment_prefix": "#"}"##),
      ("Templates/tool.py", "# header\nprint('hi')\n"),
    ],
  );
  let settings = Settings::from_json_file(td.path().join("settings.json")).unwrap();
  let _cwd = test_support::CwdGuard::push(td.path());

  assert_eq!(stamped(pipeline(settings).run(&["-ephemeral"]).unwrap()), 2);
  let tool = std::fs::read_to_string(td.path().join("Templates/tool.py")).unwrap();
  assert_eq!(tool, "# header\n# keep:manual\nprint('hi')\n");
}
