//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust
//! use test_support::{init_tracing, tempdir, write_tree};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let td = tempdir();
//!     write_tree(td.path(), &[("src/a.swift", "struct A {}\n")]);
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::BTreeMap;
use std::time::SystemTime;
use std::{env, path::{Path, PathBuf}};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,autograph=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Create (and return) a temp working directory for CLI tests.
/// Also sets CWD to that directory for the duration of `_guard`'s lifetime.
pub fn temp_cwd() -> (tempfile::TempDir, CwdGuard) {
    let td = tempdir();
    let guard = CwdGuard::push(td.path());
    (td, guard)
}

/// Write `(relative path, content)` pairs under `root`, creating parent folders.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    }
}

/// Every regular file under `root` with its content, keyed by path relative to `root`.
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    files_under(root)
        .into_iter()
        .map(|p| {
            let bytes = std::fs::read(&p).unwrap_or_else(|e| panic!("failed to read {}: {e}", p.display()));
            (p.strip_prefix(root).unwrap().to_path_buf(), bytes)
        })
        .collect()
}

/// Modification time of every regular file under `root`, keyed by relative path.
pub fn mtimes(root: &Path) -> BTreeMap<PathBuf, SystemTime> {
    files_under(root)
        .into_iter()
        .map(|p| {
            let modified = std::fs::metadata(&p).and_then(|m| m.modified()).expect("mtime");
            (p.strip_prefix(root).unwrap().to_path_buf(), modified)
        })
        .collect()
}

fn files_under(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.unwrap_or_else(|e| panic!("failed to walk {}: {e}", root.display())))
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// A small project: sources (one with Cyrillic text), a nested folder, and a template.
pub fn fixture_project() -> tempfile::TempDir {
    let td = tempdir();
    write_tree(
        td.path(),
        &[
            ("Sources/Model.swift", "// Model\nstruct Model {\n  let id: Int\n}\n"),
            ("Sources/Greeting.swift", "let greeting = \"\\(name), привет\"\n"),
            ("Sources/Nested/Service.swift", "final class Service {}\n"),
            ("Templates/Mock.swift", "// Generated once\n// Edit freely\nfinal class Mock {}\n"),
        ],
    );
    td
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Example:
/// ```ignore
/// use test_support::cmd_bin;
/// use predicates::prelude::*;
///
/// let mut cmd = cmd_bin("autograph");
/// cmd.arg("-help").assert().success().stdout(predicate::str::contains("Accepted arguments"));
/// ```
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Guard that restores the previous current working directory when dropped.
pub struct CwdGuard {
    prev: PathBuf,
}

impl CwdGuard {
    pub fn push<P: AsRef<Path>>(new_dir: P) -> Self {
        let prev = env::current_dir().expect("cwd");
        env::set_current_dir(&new_dir).unwrap_or_else(|e| {
            panic!("failed to set cwd to {}: {e}", new_dir.as_ref().display())
        });
        Self { prev }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.prev);
    }
}
