use std::path::PathBuf;

use autograph::{
  run_to_exit_code, Artifact, Extraction, FileRef, ParameterSet, Pipeline, PipelineError, Settings, StaticFolders,
  EXIT_UNDESCRIBED,
};
use serial_test::serial;

fn sources() -> StaticFolders {
  StaticFolders { input: vec![PathBuf::from("Sources")], ephemeral: vec![] }
}

fn names(files: &[FileRef]) -> anyhow::Result<Extraction<Vec<String>>> {
  Ok(Extraction::clean(files.iter().map(FileRef::name).collect()))
}

fn listing(names: Vec<String>, _: &ParameterSet) -> anyhow::Result<Vec<Artifact>> {
  Ok(vec![Artifact::new("gen/list.txt", names.join("\n"))])
}

#[test]
#[serial]
fn sources_survive_a_failing_extractor() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let before = test_support::read_tree(td.path());
  let _cwd = test_support::CwdGuard::push(td.path());

  let extractor =
    |_: &[FileRef]| -> anyhow::Result<Extraction<Vec<String>>> { Err(anyhow::anyhow!("unexpected token")) };
  let pipeline = Pipeline::new(Settings::default(), sources(), extractor, listing);
  let err = pipeline.run(&["-resolving_interpolation"]).unwrap_err();

  assert!(matches!(err, PipelineError::Extraction(_)));
  assert!(err.to_string().contains("unexpected token"));
  assert_eq!(test_support::read_tree(td.path()), before);
}

#[test]
#[serial]
fn sources_survive_a_failing_composer() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let before = test_support::read_tree(td.path());
  let _cwd = test_support::CwdGuard::push(td.path());

  let composer =
    |_: Vec<String>, _: &ParameterSet| -> anyhow::Result<Vec<Artifact>> { Err(anyhow::anyhow!("no template")) };
  let pipeline = Pipeline::new(Settings::default(), sources(), names, composer);
  let err = pipeline.run(&["-resolving_interpolation"]).unwrap_err();

  assert!(matches!(err, PipelineError::Composer(_)));
  assert_eq!(test_support::read_tree(td.path()), before);
}

#[test]
#[serial]
fn sources_survive_a_panicking_extractor() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let before = test_support::read_tree(td.path());
  let _cwd = test_support::CwdGuard::push(td.path());

  let extractor = |files: &[FileRef]| -> anyhow::Result<Extraction<Vec<String>>> {
    let greeting = files.iter().find(|f| f.name() == "Greeting.swift").expect("greeting discovered");
    let seen = std::fs::read_to_string(greeting.path()).expect("readable");
    assert!(!seen.contains("привет"), "extractor must see stripped text");
    panic!("parser bug")
  };
  let pipeline = Pipeline::new(Settings::default(), sources(), extractor, listing);

  assert_eq!(run_to_exit_code(&pipeline, &["-resolving_interpolation"]), EXIT_UNDESCRIBED);
  assert_eq!(test_support::read_tree(td.path()), before);
}

#[test]
#[serial]
fn without_the_flag_the_extractor_sees_original_text() {
  test_support::init_tracing();
  let td = test_support::fixture_project();
  let _cwd = test_support::CwdGuard::push(td.path());

  let extractor = |files: &[FileRef]| -> anyhow::Result<Extraction<Vec<String>>> {
    let mut out = Vec::new();
    for f in files {
      out.push(std::fs::read_to_string(f.path())?);
    }
    Ok(Extraction::clean(out))
  };
  let composer = |texts: Vec<String>, _: &ParameterSet| -> anyhow::Result<Vec<Artifact>> {
    Ok(vec![Artifact::new("gen/all.txt", texts.concat())])
  };
  let pipeline = Pipeline::new(Settings::default(), sources(), extractor, composer);
  pipeline.run(&[] as &[&str]).unwrap();

  let all = std::fs::read_to_string(td.path().join("gen/all.txt")).unwrap();
  assert!(all.contains("привет"));
}
