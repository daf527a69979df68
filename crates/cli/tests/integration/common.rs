//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory; the binary runs with it as
/// the working directory, so the restore manifest and any relative output
/// paths land inside it.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &[u8]) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Read a file relative to the temp directory.
  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  /// Parse a JSON file relative to the temp directory.
  pub fn read_json(&self, relative_path: &str) -> serde_json::Value {
    serde_json::from_str(&self.read_file(relative_path)).unwrap()
  }

  /// Path of a file relative to the temp directory.
  pub fn path(&self, relative_path: &str) -> PathBuf {
    let p = self.temp.path().join(relative_path);
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Get a pre-configured Command for the fwpatch binary, running in the
  /// isolated temp directory.
  pub fn fwpatch_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("fwpatch");
    cmd.current_dir(self.temp.path());
    cmd
  }
}
